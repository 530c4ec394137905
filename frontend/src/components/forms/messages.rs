use common::model::submission::SubmissionResult;

pub enum Msg {
    SetField(&'static str, String),
    Submit,
    Submitted { ticket: u64, result: SubmissionResult },
    Cancel,
    FileSelected(web_sys::File),
    Uploaded(String),
    UploadFailed(String),
}
