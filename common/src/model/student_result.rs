use serde::{Deserialize, Serialize};

/// A student's mark for either an exam or an assignment.
///
/// At least one of `exam_id` and `assignment_id` is set on every record the
/// result form accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub score: f64,
    pub grade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub student_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<i64>,
}
