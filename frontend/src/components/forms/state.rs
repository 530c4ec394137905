//! Component state for the record form.

use common::forms::workflow::FormWorkflow;
use yew::prelude::*;

use super::props::FormProps;

pub struct FormComponent {
    /// `None` when the form definition could not be built; `load_error` says why.
    pub workflow: Option<FormWorkflow>,

    pub load_error: Option<String>,

    /// Reference to the hidden file input of the attachment control.
    pub file_input_ref: NodeRef,
}

impl FormComponent {
    pub fn new(props: &FormProps) -> Self {
        match props.kind.definition() {
            Ok(definition) => Self {
                workflow: Some(FormWorkflow::initialize(
                    definition,
                    props.mode,
                    props.existing.as_ref(),
                    props.reference.as_ref(),
                )),
                load_error: None,
                file_input_ref: NodeRef::default(),
            },
            Err(err) => Self {
                workflow: None,
                load_error: Some(err.to_string()),
                file_input_ref: NodeRef::default(),
            },
        }
    }
}
