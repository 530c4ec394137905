use crate::forms::error::SchemaError;
use crate::forms::layout::{FieldLayout, FormLayout, InputType, Widget};
use crate::forms::schema::{FieldSpec, FormSchema};
use crate::model::announcement::{Priority, TargetAudience};
use crate::model::reference::ReferenceKind;

pub fn schema() -> Result<FormSchema, SchemaError> {
    FormSchema::builder("announcement")
        .field(FieldSpec::identifier())
        .field(FieldSpec::text("title", "Title is required!"))
        .field(FieldSpec::text("content", "Content is required!"))
        .field(FieldSpec::date("date", "Date is required!"))
        .field(FieldSpec::choice("priority", Priority::VALUES, "Priority is required!"))
        .field(FieldSpec::choice(
            "targetAudience",
            TargetAudience::VALUES,
            "Target audience is required!",
        ))
        .field(FieldSpec::text("authorId", "Author is required!"))
        .build()
}

pub fn layout() -> FormLayout {
    FormLayout {
        entity: "Announcement",
        fields: vec![
            FieldLayout::new("title", "Title", Widget::Input(InputType::Text)),
            FieldLayout::new("date", "Date", Widget::Input(InputType::Date)),
            FieldLayout::new(
                "priority",
                "Priority",
                Widget::Choice(&[
                    ("LOW", "Low"),
                    ("MEDIUM", "Medium"),
                    ("HIGH", "High"),
                    ("URGENT", "Urgent"),
                ]),
            ),
            FieldLayout::new(
                "targetAudience",
                "Target Audience",
                Widget::Choice(&[
                    ("ALL", "All"),
                    ("STUDENTS", "Students"),
                    ("TEACHERS", "Teachers"),
                    ("PARENTS", "Parents"),
                    ("STAFF", "Staff"),
                ]),
            ),
            FieldLayout::new(
                "authorId",
                "Author",
                Widget::Reference {
                    source: ReferenceKind::Teachers,
                    placeholder: None,
                },
            ),
            FieldLayout::new("content", "Content", Widget::TextArea),
            FieldLayout::identifier(),
        ],
        attachment: None,
        summary: &["title", "date"],
    }
}
