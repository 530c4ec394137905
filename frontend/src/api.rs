//! HTTP calls to the host service.
//!
//! Every call is a thin `gloo-net` request against the routes served by the
//! backend. Submission failures of any kind, transport included, come back
//! as a failed `SubmissionResult` so the form can show them.

use common::forms::workflow::SubmissionHandler;
use common::forms::FormKind;
use common::model::reference::ReferenceData;
use common::model::submission::{FormMode, SubmissionResult};
use common::requests::UploadResponse;
use gloo_net::http::Request;
use serde_json::{Map, Value};
use web_sys::{File, FormData};

const API_PATH: &str = "/api/forms";
const UPLOAD_PATH: &str = "/api/uploads";

pub fn action_url(kind: FormKind, mode: FormMode) -> String {
    format!("{}/{}/{}", API_PATH, kind, mode.as_str())
}

/// The create and update actions, posted as JSON.
pub struct HttpActions;

impl SubmissionHandler for HttpActions {
    async fn create(&self, kind: FormKind, data: Map<String, Value>) -> SubmissionResult {
        post_submission(kind, FormMode::Create, data).await
    }

    async fn update(&self, kind: FormKind, data: Map<String, Value>) -> SubmissionResult {
        post_submission(kind, FormMode::Update, data).await
    }
}

async fn post_submission(
    kind: FormKind,
    mode: FormMode,
    data: Map<String, Value>,
) -> SubmissionResult {
    let request = match Request::post(&action_url(kind, mode)).json(&data) {
        Ok(request) => request,
        Err(err) => return SubmissionResult::failure(err.to_string()),
    };

    match request.send().await {
        Ok(response) => match response.json::<SubmissionResult>().await {
            Ok(result) => result,
            Err(_) => SubmissionResult::failure(format!(
                "Unexpected response from the server ({})",
                response.status()
            )),
        },
        Err(err) => SubmissionResult::failure(err.to_string()),
    }
}

pub async fn fetch_reference(kind: FormKind) -> Result<ReferenceData, gloo_net::Error> {
    Request::get(&format!("{}/{}/reference", API_PATH, kind))
        .send()
        .await?
        .json()
        .await
}

pub async fn fetch_records(kind: FormKind) -> Result<Vec<Value>, gloo_net::Error> {
    Request::get(&format!("{}/{}/records", API_PATH, kind))
        .send()
        .await?
        .json()
        .await
}

/// Sends `file` as the `file` field of a multipart request.
pub async fn upload_file(file: File) -> Result<UploadResponse, String> {
    let form = FormData::new().map_err(|_| "Cannot build the upload form".to_string())?;
    form.append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|_| "Cannot read the selected file".to_string())?;

    let response = Request::post(UPLOAD_PATH)
        .body(form)
        .map_err(|err| err.to_string())?
        .send()
        .await
        .map_err(|err| err.to_string())?;

    if response.ok() {
        response.json().await.map_err(|err| err.to_string())
    } else {
        Err(response.text().await.unwrap_or_else(|_| response.status_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_urls_follow_kind_and_mode() {
        assert_eq!(
            action_url(FormKind::Result, FormMode::Create),
            "/api/forms/result/create"
        );
        assert_eq!(
            action_url(FormKind::Attendance, FormMode::Update),
            "/api/forms/attendance/update"
        );
    }
}
