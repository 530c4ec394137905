use crate::forms::error::SchemaError;
use crate::forms::layout::{FieldLayout, FormLayout, InputType, Widget};
use crate::forms::schema::{FieldSpec, FormSchema};
use crate::model::attendance::AttendanceStatus;
use crate::model::reference::ReferenceKind;

pub fn schema() -> Result<FormSchema, SchemaError> {
    FormSchema::builder("attendance")
        .field(FieldSpec::identifier())
        .field(FieldSpec::date("date", "Date is required!"))
        .field(FieldSpec::choice("status", AttendanceStatus::VALUES, "Status is required!"))
        .field(FieldSpec::text("notes", "Invalid notes").optional())
        .field(FieldSpec::text("studentId", "Student is required!"))
        .field(
            FieldSpec::integer("lessonId", "Lesson is required!")
                .min(1.0, "Lesson is required!"),
        )
        .build()
}

pub fn layout() -> FormLayout {
    FormLayout {
        entity: "Attendance",
        fields: vec![
            FieldLayout::new("date", "Date", Widget::Input(InputType::Date)),
            FieldLayout::new(
                "studentId",
                "Student",
                Widget::Reference {
                    source: ReferenceKind::Students,
                    placeholder: None,
                },
            ),
            FieldLayout::new(
                "lessonId",
                "Lesson",
                Widget::Reference {
                    source: ReferenceKind::Lessons,
                    placeholder: None,
                },
            ),
            FieldLayout::new(
                "status",
                "Status",
                Widget::Choice(&[
                    ("PRESENT", "Present"),
                    ("ABSENT", "Absent"),
                    ("LATE", "Late"),
                    ("EXCUSED", "Excused"),
                ]),
            ),
            FieldLayout::new("notes", "Notes", Widget::TextArea),
            FieldLayout::identifier(),
        ],
        attachment: None,
        summary: &["date", "studentId", "status"],
    }
}
