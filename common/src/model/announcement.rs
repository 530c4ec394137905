use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A notice published to part of the school community.
///
/// This is the typed shape of the data produced by the announcement form once
/// it passes validation. The host service deserializes submissions into this
/// struct before storing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// Present only for records that already exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    /// Publication date.
    pub date: NaiveDate,
    pub priority: Priority,
    pub target_audience: TargetAudience,
    /// Id of the teacher who authored the announcement.
    pub author_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const VALUES: &'static [&'static str] = &["LOW", "MEDIUM", "HIGH", "URGENT"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetAudience {
    All,
    Students,
    Teachers,
    Parents,
    Staff,
}

impl TargetAudience {
    pub const VALUES: &'static [&'static str] =
        &["ALL", "STUDENTS", "TEACHERS", "PARENTS", "STAFF"];
}
