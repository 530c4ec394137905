//! Declarative validated-form workflow.
//!
//! A form is described once by a [`FormDefinition`]: a [`schema::FormSchema`]
//! (fields, coercion, refinements) and a [`layout::FormLayout`] (controls and
//! labels). The generic [`workflow::FormWorkflow`] drives any definition
//! through validation, submission and the post-submission effects. The six
//! record forms of the school application live in [`entities`].

pub mod entities;
pub mod error;
pub mod input;
pub mod layout;
pub mod schema;
pub mod value;
pub mod workflow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::model::announcement::Announcement;
use crate::model::assignment::Assignment;
use crate::model::attendance::Attendance;
use crate::model::event::Event;
use crate::model::lesson::Lesson;
use crate::model::student_result::StudentResult;
use error::{FormError, SchemaError};
use layout::FormLayout;
use schema::FormSchema;

/// The record forms of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Announcement,
    Assignment,
    Attendance,
    Event,
    Lesson,
    Result,
}

impl FormKind {
    pub const ALL: [FormKind; 6] = [
        FormKind::Announcement,
        FormKind::Assignment,
        FormKind::Attendance,
        FormKind::Event,
        FormKind::Lesson,
        FormKind::Result,
    ];

    /// Path segment used by the HTTP routes.
    pub fn as_str(self) -> &'static str {
        match self {
            FormKind::Announcement => "announcement",
            FormKind::Assignment => "assignment",
            FormKind::Attendance => "attendance",
            FormKind::Event => "event",
            FormKind::Lesson => "lesson",
            FormKind::Result => "result",
        }
    }

    pub fn definition(self) -> Result<FormDefinition, SchemaError> {
        use entities::{announcement, assignment, attendance, event, lesson, result};

        let (schema, layout) = match self {
            FormKind::Announcement => (announcement::schema()?, announcement::layout()),
            FormKind::Assignment => (assignment::schema()?, assignment::layout()),
            FormKind::Attendance => (attendance::schema()?, attendance::layout()),
            FormKind::Event => (event::schema()?, event::layout()),
            FormKind::Lesson => (lesson::schema()?, lesson::layout()),
            FormKind::Result => (result::schema()?, result::layout()),
        };
        Ok(FormDefinition {
            kind: self,
            schema,
            layout,
        })
    }

    /// Round-trips cleaned data through the typed record of this kind, which
    /// rejects anything the record cannot hold and normalizes the JSON.
    pub fn normalize(self, data: Map<String, Value>) -> Result<Value, FormError> {
        fn through<T: serde::de::DeserializeOwned + Serialize>(
            data: Map<String, Value>,
        ) -> Result<Value, FormError> {
            let record: T = serde_json::from_value(Value::Object(data))?;
            Ok(serde_json::to_value(record)?)
        }

        match self {
            FormKind::Announcement => through::<Announcement>(data),
            FormKind::Assignment => through::<Assignment>(data),
            FormKind::Attendance => through::<Attendance>(data),
            FormKind::Event => through::<Event>(data),
            FormKind::Lesson => through::<Lesson>(data),
            FormKind::Result => through::<StudentResult>(data),
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FormError::UnknownKind(s.to_string()))
    }
}

/// Everything the workflow needs to know about one form.
#[derive(Debug, Clone)]
pub struct FormDefinition {
    pub kind: FormKind,
    pub schema: FormSchema,
    pub layout: FormLayout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_definition_builds() {
        for kind in FormKind::ALL {
            let definition = kind.definition().unwrap();
            assert_eq!(definition.kind, kind);
            assert_eq!(definition.schema.name(), kind.as_str());
        }
    }

    #[test]
    fn layouts_only_reference_schema_fields() {
        for kind in FormKind::ALL {
            let FormDefinition { schema, layout, .. } = kind.definition().unwrap();
            for field in &layout.fields {
                assert!(schema.field(field.key).is_some(), "{kind}: {}", field.key);
                if let Some(other) = field.disabled_when {
                    assert!(schema.field(other).is_some(), "{kind}: {other}");
                }
            }
            if let Some(attachment) = &layout.attachment {
                assert!(schema.field(attachment.key).is_some());
            }
            assert!(schema.field("id").is_some());
            assert!(layout.field("id").is_some_and(|f| f.is_hidden()));
        }
    }

    #[test]
    fn kind_parses_from_path_segment() {
        assert_eq!("event".parse::<FormKind>().unwrap(), FormKind::Event);
        assert!(matches!(
            "exam".parse::<FormKind>(),
            Err(FormError::UnknownKind(kind)) if kind == "exam"
        ));
    }
}
