use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A dated school event such as a holiday or a parents' meeting.
///
/// `end_date` is never before `start_date` for records accepted by the event form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Locator returned by the upload service for the event image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Holiday,
    Exam,
    Activity,
    Meeting,
    Other,
}

impl EventType {
    pub const VALUES: &'static [&'static str] =
        &["HOLIDAY", "EXAM", "ACTIVITY", "MEETING", "OTHER"];
}
