use crate::forms::error::SchemaError;
use crate::forms::layout::{Attachment, FieldLayout, FormLayout, InputType, Widget};
use crate::forms::schema::{FieldSpec, FormSchema, Refinement};
use crate::model::event::EventType;

pub fn schema() -> Result<FormSchema, SchemaError> {
    FormSchema::builder("event")
        .field(FieldSpec::identifier())
        .field(FieldSpec::text("title", "Title is required!"))
        .field(FieldSpec::text("description", "Description is required!"))
        .field(FieldSpec::datetime("startDate", "Start date is required!"))
        .field(FieldSpec::datetime("endDate", "End date is required!"))
        .field(FieldSpec::text("location", "Location is required!"))
        .field(FieldSpec::choice("type", EventType::VALUES, "Event type is required!"))
        .field(FieldSpec::text("imgUrl", "Invalid image").optional())
        .refine(Refinement::ordered(
            "startDate",
            "endDate",
            "End date must be after start date",
        ))
        .build()
}

pub fn layout() -> FormLayout {
    FormLayout {
        entity: "Event",
        fields: vec![
            FieldLayout::new("title", "Title", Widget::Input(InputType::Text)),
            FieldLayout::new("location", "Location", Widget::Input(InputType::Text)),
            FieldLayout::new(
                "startDate",
                "Start Date & Time",
                Widget::Input(InputType::DateTimeLocal),
            ),
            FieldLayout::new("endDate", "End Date & Time", Widget::Input(InputType::DateTimeLocal)),
            FieldLayout::new(
                "type",
                "Event Type",
                Widget::Choice(&[
                    ("HOLIDAY", "Holiday"),
                    ("EXAM", "Exam"),
                    ("ACTIVITY", "Activity"),
                    ("MEETING", "Meeting"),
                    ("OTHER", "Other"),
                ]),
            ),
            FieldLayout::new("description", "Description", Widget::TextArea),
            FieldLayout::identifier(),
        ],
        attachment: Some(Attachment {
            key: "imgUrl",
            caption: "Event Image",
            prompt: "Upload an image",
            accept: "image/*",
        }),
        summary: &["title", "startDate"],
    }
}
