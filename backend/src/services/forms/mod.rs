//! # Form Service Module
//!
//! HTTP collaborators of the form workflow, one set per form kind. The `{kind}`
//! path segment is one of `announcement`, `assignment`, `attendance`, `event`,
//! `lesson` or `result`; any other value answers `404 Not Found`.
//!
//! ## Sub-modules:
//! - `reference`: lookup lists rendered by the form's selection controls.
//! - `records`: stored records, reloaded by the client after a submission.
//! - `submit`: the create and update actions.

mod records;
mod reference;
mod submit;

use actix_web::web::{get, post, scope, JsonConfig};
use actix_web::Scope;

/// The base path for all form endpoints.
const API_PATH: &str = "/api/forms";

/// Largest accepted submission body. Records are a handful of short fields.
pub const MAX_SUBMISSION_BYTES: usize = 64 * 1024;

/// Configures and returns the Actix `Scope` for the form endpoints.
///
/// # Registered Routes:
///
/// *   **`GET /{kind}/reference`**: `ReferenceData` limited to the kinds the
///     form renders.
/// *   **`GET /{kind}/records`**: array of stored records, oldest first.
/// *   **`POST /{kind}/create`**: validates the JSON body with the form's
///     schema, stores it under a new id and answers a `SubmissionResult`.
/// *   **`POST /{kind}/update`**: same as create, but replaces the record
///     named by the body's `id`.
///
/// Bodies over `MAX_SUBMISSION_BYTES` answer `413 Payload Too Large`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .app_data(JsonConfig::default().limit(MAX_SUBMISSION_BYTES))
        .route("/{kind}/reference", get().to(reference::process))
        .route("/{kind}/records", get().to(records::process))
        .route("/{kind}/create", post().to(submit::process_create))
        .route("/{kind}/update", post().to(submit::process_update))
}
