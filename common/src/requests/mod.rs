use serde::{Deserialize, Serialize};

/// Response of the upload endpoint (`POST /api/uploads`).
///
/// `url` is the resource locator stored in the attachment field of the form
/// (`imgUrl` for events, `fileUrl` for assignments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    /// Original file name as sent by the browser.
    pub original_filename: String,
}
