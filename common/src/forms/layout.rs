//! Field-layout descriptors: how each schema field is presented.
//!
//! The layout is deliberately free of any UI toolkit. It names the control to
//! use, its label, where its options come from and when it is disabled; the
//! client turns that into markup.

use serde_json::Value;

use crate::model::reference::{ReferenceData, ReferenceKind};
use crate::model::submission::FormMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Number,
    Date,
    DateTimeLocal,
    Time,
}

impl InputType {
    /// Value of the HTML `type` attribute.
    pub fn as_html(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Number => "number",
            InputType::Date => "date",
            InputType::DateTimeLocal => "datetime-local",
            InputType::Time => "time",
        }
    }
}

/// The control rendered for a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widget {
    Input(InputType),
    TextArea,
    /// Fixed options as `(value, label)` pairs.
    Choice(&'static [(&'static str, &'static str)]),
    /// Options taken from the caller's reference data. With a placeholder the
    /// control starts on an empty "Select a ..." option.
    Reference {
        source: ReferenceKind,
        placeholder: Option<&'static str>,
    },
    /// Rendered hidden and only in update mode. Used for the record id.
    Hidden,
}

/// One `<option>` of a selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }
}

impl Widget {
    /// Options of a selection control; empty for other widgets.
    ///
    /// A reference control whose collection is missing or empty gets a single
    /// disabled "No <kind> available" entry so it is never left blank.
    pub fn options(&self, reference: Option<&ReferenceData>) -> Vec<SelectOption> {
        match *self {
            Widget::Choice(choices) => choices
                .iter()
                .map(|(value, label)| SelectOption::new(*value, *label))
                .collect(),
            Widget::Reference {
                source,
                placeholder,
            } => {
                let entries = reference.map(|r| r.options(source)).unwrap_or(&[]);
                let mut options: Vec<SelectOption> = placeholder
                    .map(|label| SelectOption::new("", label))
                    .into_iter()
                    .collect();

                if entries.is_empty() {
                    options.push(SelectOption {
                        value: String::new(),
                        label: format!("No {} available", source.as_str()),
                        disabled: true,
                    });
                } else {
                    options.extend(
                        entries
                            .iter()
                            .map(|entry| SelectOption::new(entry.id.clone(), entry.label.clone())),
                    );
                }
                options
            }
            _ => Vec::new(),
        }
    }

    /// Value a freshly opened selection control shows without user input:
    /// its first enabled option, unless it starts on a placeholder.
    pub fn initial_value(&self, reference: Option<&ReferenceData>) -> Option<String> {
        match self {
            Widget::Choice(_) | Widget::Reference {
                placeholder: None, ..
            } => self
                .options(reference)
                .into_iter()
                .find(|option| !option.disabled)
                .map(|option| option.value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldLayout {
    pub key: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    /// While this other field has a value the control is disabled and its own
    /// value is left out of the submission.
    pub disabled_when: Option<&'static str>,
    /// Spans the whole row instead of a third of it.
    pub wide: bool,
}

impl FieldLayout {
    pub fn new(key: &'static str, label: &'static str, widget: Widget) -> Self {
        Self {
            key,
            label,
            widget,
            disabled_when: None,
            wide: matches!(widget, Widget::TextArea),
        }
    }

    pub fn identifier() -> Self {
        Self::new("id", "Id", Widget::Hidden)
    }

    pub fn disabled_when(mut self, other: &'static str) -> Self {
        self.disabled_when = Some(other);
        self
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self.widget, Widget::Hidden)
    }
}

/// A file attached out of band. The upload service returns a locator that is
/// stored in the schema field `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub key: &'static str,
    /// Caption above the upload control, e.g. "Event Image".
    pub caption: &'static str,
    /// Call to action, e.g. "Upload an image".
    pub prompt: &'static str,
    /// Value of the file input's `accept` attribute.
    pub accept: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormLayout {
    /// Display name of the record, e.g. "Announcement".
    pub entity: &'static str,
    pub fields: Vec<FieldLayout>,
    pub attachment: Option<Attachment>,
    /// Fields joined to describe a stored record in a listing.
    pub summary: &'static [&'static str],
}

impl FormLayout {
    pub fn heading(&self, mode: FormMode) -> String {
        let entity = self.entity.to_lowercase();
        match mode {
            FormMode::Create => format!("Create a new {entity}"),
            FormMode::Update => format!("Update the {entity}"),
        }
    }

    /// Notification shown after a successful submission.
    pub fn success_message(&self, mode: FormMode) -> String {
        format!("{} has been {}!", self.entity, mode.past_tense())
    }

    pub fn field(&self, key: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Fields rendered in `mode`. Hidden fields only exist when updating.
    pub fn visible_fields(&self, mode: FormMode) -> impl Iterator<Item = &FieldLayout> {
        self.fields
            .iter()
            .filter(move |f| mode == FormMode::Update || !f.is_hidden())
    }

    /// Reference collections the form renders, in field order, without repeats.
    pub fn reference_kinds(&self) -> Vec<ReferenceKind> {
        let mut kinds = Vec::new();
        for field in &self.fields {
            if let Widget::Reference { source, .. } = field.widget {
                if !kinds.contains(&source) {
                    kinds.push(source);
                }
            }
        }
        kinds
    }

    /// One-line description of a stored record for listings.
    pub fn summarize(&self, record: &Value) -> String {
        let parts: Vec<String> = self
            .summary
            .iter()
            .filter_map(|key| match record.get(*key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
            .collect();

        if parts.is_empty() {
            match record.get("id") {
                Some(id) => format!("{} #{}", self.entity, id),
                None => self.entity.to_string(),
            }
        } else {
            parts.join(" · ")
        }
    }
}
