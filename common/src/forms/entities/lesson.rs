use crate::forms::error::SchemaError;
use crate::forms::layout::{FieldLayout, FormLayout, InputType, Widget};
use crate::forms::schema::{FieldSpec, FormSchema};
use crate::model::lesson::Weekday;
use crate::model::reference::ReferenceKind;

pub fn schema() -> Result<FormSchema, SchemaError> {
    FormSchema::builder("lesson")
        .field(FieldSpec::identifier())
        .field(FieldSpec::text("title", "Lesson title is required!"))
        .field(FieldSpec::text("description", "Invalid description").optional())
        .field(
            FieldSpec::integer("subjectId", "Subject is required!")
                .min(1.0, "Subject is required!"),
        )
        .field(FieldSpec::text("teacherId", "Teacher is required!"))
        .field(
            FieldSpec::integer("classId", "Class is required!").min(1.0, "Class is required!"),
        )
        .field(
            FieldSpec::choice("day", Weekday::VALUES, "Day is required!")
                .default_value("MONDAY"),
        )
        .field(FieldSpec::text("startTime", "Start time is required!"))
        .field(FieldSpec::text("endTime", "End time is required!"))
        .build()
}

pub fn layout() -> FormLayout {
    FormLayout {
        entity: "Lesson",
        fields: vec![
            FieldLayout::new("title", "Title", Widget::Input(InputType::Text)),
            FieldLayout::new("description", "Description", Widget::Input(InputType::Text)),
            FieldLayout::identifier(),
            FieldLayout::new(
                "subjectId",
                "Subject",
                Widget::Reference {
                    source: ReferenceKind::Subjects,
                    placeholder: Some("Select a subject"),
                },
            ),
            FieldLayout::new(
                "teacherId",
                "Teacher",
                Widget::Reference {
                    source: ReferenceKind::Teachers,
                    placeholder: Some("Select a teacher"),
                },
            ),
            FieldLayout::new(
                "classId",
                "Class",
                Widget::Reference {
                    source: ReferenceKind::Classes,
                    placeholder: Some("Select a class"),
                },
            ),
            FieldLayout::new(
                "day",
                "Day",
                Widget::Choice(&[
                    ("MONDAY", "Monday"),
                    ("TUESDAY", "Tuesday"),
                    ("WEDNESDAY", "Wednesday"),
                    ("THURSDAY", "Thursday"),
                    ("FRIDAY", "Friday"),
                    ("SATURDAY", "Saturday"),
                    ("SUNDAY", "Sunday"),
                ]),
            ),
            FieldLayout::new("startTime", "Start Time", Widget::Input(InputType::Time)),
            FieldLayout::new("endTime", "End Time", Widget::Input(InputType::Time)),
        ],
        attachment: None,
        summary: &["title", "day", "startTime"],
    }
}
