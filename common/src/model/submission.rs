use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Update,
}

impl FormMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FormMode::Create => "create",
            FormMode::Update => "update",
        }
    }

    /// Past-tense verb used in user-facing notifications.
    pub fn past_tense(self) -> &'static str {
        match self {
            FormMode::Create => "created",
            FormMode::Update => "updated",
        }
    }
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(FormMode::Create),
            "update" => Ok(FormMode::Update),
            other => Err(format!("unknown form mode `{other}`")),
        }
    }
}

/// Outcome reported by a submission action.
///
/// `success` is the only completion flag. A fresh form starts with
/// `SubmissionResult::default()`: not successful and without an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
