use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{web, HttpResponse, Responder};
use common::requests::UploadResponse;
use futures_util::StreamExt;
use log::info;
use regex::Regex;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use uuid::Uuid;

use super::{MAX_UPLOAD_BYTES, PUBLIC_PATH};
use crate::store::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Missing file")]
    MissingFile,
    #[error("File is larger than {} MB", MAX_UPLOAD_BYTES / (1024 * 1024))]
    TooLarge,
    #[error(transparent)]
    Multipart(#[from] MultipartError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// HTTP handler wrapper that converts the stored upload into an `HttpResponse`.
///
/// - On success: `200 OK` with an `UploadResponse`.
/// - Too large: `413 Payload Too Large`.
/// - Otherwise: `400 Bad Request` with the error message.
pub async fn process(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    match save_upload(&state.upload_dir, payload).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(UploadError::TooLarge) => {
            HttpResponse::PayloadTooLarge().body(format!("Error: {}", UploadError::TooLarge))
        }
        Err(e) => HttpResponse::BadRequest().body(format!("Error: {}", e)),
    }
}

/// Keeps letters, digits, dots, dashes and underscores; everything else becomes `_`.
fn sanitize_filename(name: &str) -> Result<String, regex::Error> {
    let unsafe_chars = Regex::new(r"[^A-Za-z0-9._-]+")?;
    let base = name.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(name);
    let cleaned = unsafe_chars.replace_all(base, "_");
    let cleaned = cleaned.trim_start_matches('.');
    Ok(if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    })
}

/// Streams the `file` field of `payload` into `upload_dir`.
pub async fn save_upload(
    upload_dir: &Path,
    mut payload: Multipart,
) -> Result<UploadResponse, UploadError> {
    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if name.as_deref() != Some("file") {
            continue;
        }

        let original_filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize_filename(&original_filename)?);

        fs::create_dir_all(upload_dir)?;
        let path = upload_dir.join(&stored_name);
        let written = match write_field(&mut field, &path).await {
            Ok(written) => written,
            Err(e) => {
                let _ = fs::remove_file(&path);
                return Err(e);
            }
        };

        info!("Stored upload {} ({} bytes)", stored_name, written);
        return Ok(UploadResponse {
            url: format!("{}/{}", PUBLIC_PATH, stored_name),
            original_filename,
        });
    }

    Err(UploadError::MissingFile)
}

/// Writes `field` to `path`. The caller removes the file when this fails.
async fn write_field(field: &mut Field, path: &Path) -> Result<usize, UploadError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut written = 0usize;

    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        written += chunk.len();
        if written > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge);
        }
        writer.write_all(&chunk)?;
    }
    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::uploads::{configure_routes, serve_files};
    use crate::store::state::load_reference;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test as actix_test, App};

    const BOUNDARY: &str = "----school-forms-boundary";

    fn multipart(field: &str, filename: &str, content: &str) -> String {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        )
    }

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(sanitize_filename("My Poster (final).png").unwrap(), "My_Poster_final_.png");
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("..").unwrap(), "file");
        assert_eq!(sanitize_filename("").unwrap(), "file");
    }

    #[actix_web::test]
    async fn upload_is_stored_and_served() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(load_reference(None).unwrap(), dir.path().to_path_buf()).unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(configure_routes())
                .service(serve_files(dir.path())),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/api/uploads")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart("file", "brief.pdf", "assignment brief"))
            .to_request();
        let response: UploadResponse = actix_test::call_and_read_body_json(&app, req).await;

        assert!(response.url.starts_with("/uploads/"));
        assert!(response.url.ends_with("-brief.pdf"));
        assert_eq!(response.original_filename, "brief.pdf");

        let req = actix_test::TestRequest::get().uri(&response.url).to_request();
        let body = actix_test::call_and_read_body(&app, req).await;
        assert_eq!(body, "assignment brief".as_bytes());
    }

    #[actix_web::test]
    async fn request_without_file_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(load_reference(None).unwrap(), dir.path().to_path_buf()).unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/api/uploads")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart("attachment", "brief.pdf", "x"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn truncated_upload_leaves_no_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(load_reference(None).unwrap(), dir.path().to_path_buf()).unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(configure_routes()),
        )
        .await;

        let truncated = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"a.pdf\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             half of a file"
        );
        let req = actix_test::TestRequest::post()
            .uri("/api/uploads")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(truncated)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let leftover: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert!(leftover.is_empty(), "leftover files: {leftover:?}");
    }
}
