//! Attachment uploads.
//!
//! - `POST /api/uploads`: multipart/form-data with a `file` field. The file is
//!   written to the configured upload directory under a unique name and the
//!   answer is an `UploadResponse` whose `url` the form stores in its
//!   attachment field.
//! - `GET /uploads/{name}`: serves a stored upload.

use actix_files::Files;
use actix_web::web::{post, scope};
use actix_web::Scope;
use std::path::Path;

mod upload;

const API_PATH: &str = "/api/uploads";

/// Public path prefix of stored uploads.
pub const PUBLIC_PATH: &str = "/uploads";

/// Largest accepted attachment.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(upload::process))
}

/// Serves the files written by `POST /api/uploads`.
pub fn serve_files(upload_dir: &Path) -> Files {
    Files::new(PUBLIC_PATH, upload_dir)
}
