use crate::forms::error::SchemaError;
use crate::forms::layout::{Attachment, FieldLayout, FormLayout, InputType, Widget};
use crate::forms::schema::{FieldSpec, FormSchema};
use crate::model::reference::ReferenceKind;

pub fn schema() -> Result<FormSchema, SchemaError> {
    FormSchema::builder("assignment")
        .field(FieldSpec::identifier())
        .field(FieldSpec::text("title", "Assignment title is required!"))
        .field(FieldSpec::text("description", "Invalid description").optional())
        .field(FieldSpec::datetime("dueDate", "Due date is required!"))
        .field(
            FieldSpec::integer("lessonId", "Lesson is required!")
                .min(1.0, "Lesson is required!"),
        )
        .field(
            FieldSpec::number("points", "Points are required!")
                .min(0.0, "Points must be a positive number"),
        )
        .field(FieldSpec::text("fileUrl", "Invalid file").optional())
        .build()
}

pub fn layout() -> FormLayout {
    FormLayout {
        entity: "Assignment",
        fields: vec![
            FieldLayout::new("title", "Title", Widget::Input(InputType::Text)),
            FieldLayout::new("description", "Description", Widget::Input(InputType::Text)),
            FieldLayout::new("points", "Points", Widget::Input(InputType::Number)),
            FieldLayout::new("dueDate", "Due Date", Widget::Input(InputType::DateTimeLocal)),
            FieldLayout::identifier(),
            FieldLayout::new(
                "lessonId",
                "Lesson",
                Widget::Reference {
                    source: ReferenceKind::Lessons,
                    placeholder: Some("Select a lesson"),
                },
            ),
        ],
        attachment: Some(Attachment {
            key: "fileUrl",
            caption: "Assignment File",
            prompt: "Upload a file",
            accept: "",
        }),
        summary: &["title", "dueDate"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::input::FormInput;
    use rstest::rstest;

    fn essay() -> FormInput {
        FormInput::new()
            .with("title", "Essay")
            .with("dueDate", "2024-04-10T23:59")
            .with("lessonId", "3")
            .with("points", "20")
    }

    #[test]
    fn description_and_file_are_optional() {
        let cleaned = schema().unwrap().clean(&essay()).unwrap();
        assert!(!cleaned.contains("description"));
        assert!(!cleaned.contains("fileUrl"));
    }

    #[rstest]
    #[case("lessonId", "", "Lesson is required!")]
    #[case("lessonId", "0", "Lesson is required!")]
    #[case("points", "-5", "Points must be a positive number")]
    #[case("dueDate", "next week", "Due date is required!")]
    fn field_errors(#[case] key: &str, #[case] raw: &str, #[case] message: &str) {
        let errors = schema().unwrap().validate(&essay().with(key, raw));
        assert_eq!(errors.get(key), Some(message));
    }
}
