use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Homework or coursework attached to a lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
    pub lesson_id: i64,
    pub points: f64,
    /// Locator returned by the upload service for the attached file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}
