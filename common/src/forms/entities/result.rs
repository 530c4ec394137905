use crate::forms::error::SchemaError;
use crate::forms::layout::{FieldLayout, FormLayout, InputType, Widget};
use crate::forms::schema::{FieldSpec, FormSchema, Refinement};
use crate::model::reference::ReferenceKind;

pub fn schema() -> Result<FormSchema, SchemaError> {
    FormSchema::builder("result")
        .field(FieldSpec::identifier())
        .field(
            FieldSpec::number("score", "Score is required!")
                .min(0.0, "Score must be a positive number"),
        )
        .field(FieldSpec::text("grade", "Grade is required"))
        .field(FieldSpec::text("feedback", "Invalid feedback").optional())
        .field(FieldSpec::text("studentId", "Student is required!"))
        .field(
            FieldSpec::integer("examId", "Invalid exam")
                .optional()
                .min(1.0, "Invalid exam"),
        )
        .field(
            FieldSpec::integer("assignmentId", "Invalid assignment")
                .optional()
                .min(1.0, "Invalid assignment"),
        )
        .refine(Refinement::any_of(
            "examId",
            "assignmentId",
            "Either Exam or Assignment must be selected",
        ))
        .build()
}

pub fn layout() -> FormLayout {
    FormLayout {
        entity: "Result",
        fields: vec![
            FieldLayout::new(
                "studentId",
                "Student",
                Widget::Reference {
                    source: ReferenceKind::Students,
                    placeholder: None,
                },
            ),
            FieldLayout::new(
                "examId",
                "Exam (Optional)",
                Widget::Reference {
                    source: ReferenceKind::Exams,
                    placeholder: Some("Select an exam"),
                },
            ),
            FieldLayout::new(
                "assignmentId",
                "Assignment (Optional)",
                Widget::Reference {
                    source: ReferenceKind::Assignments,
                    placeholder: Some("Select an assignment"),
                },
            )
            .disabled_when("examId"),
            FieldLayout::new("score", "Score", Widget::Input(InputType::Number)),
            FieldLayout::new("grade", "Grade", Widget::Input(InputType::Text)),
            FieldLayout::new("feedback", "Feedback", Widget::TextArea),
            FieldLayout::identifier(),
        ],
        attachment: None,
        summary: &["studentId", "grade", "score"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::input::FormInput;
    use rstest::rstest;

    fn marked(exam: &str, assignment: &str) -> FormInput {
        FormInput::new()
            .with("score", "87.5")
            .with("grade", "B+")
            .with("studentId", "s1")
            .with("examId", exam)
            .with("assignmentId", assignment)
    }

    #[test]
    fn neither_exam_nor_assignment_is_anchored_to_exam() {
        let errors = schema().unwrap().validate(&marked("", ""));

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("examId"),
            Some("Either Exam or Assignment must be selected")
        );
    }

    #[rstest]
    #[case("4", "")]
    #[case("", "9")]
    #[case("4", "9")]
    fn either_source_is_enough(#[case] exam: &str, #[case] assignment: &str) {
        assert!(schema().unwrap().validate(&marked(exam, assignment)).is_empty());
    }

    #[rstest]
    #[case("0", "", "examId", "Invalid exam")]
    #[case("", "0", "assignmentId", "Invalid assignment")]
    fn zero_ids_do_not_count_as_a_selection(
        #[case] exam: &str,
        #[case] assignment: &str,
        #[case] key: &str,
        #[case] message: &str,
    ) {
        let errors = schema().unwrap().validate(&marked(exam, assignment));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(key), Some(message));
    }

    #[test]
    fn negative_score_is_rejected() {
        let errors = schema().unwrap().validate(&marked("4", "").with("score", "-1"));
        assert_eq!(errors.get("score"), Some("Score must be a positive number"));
    }
}
