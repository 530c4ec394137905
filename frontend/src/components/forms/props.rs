//! Properties of the `FormComponent`.

use common::forms::FormKind;
use common::model::reference::ReferenceData;
use common::model::submission::FormMode;
use serde_json::Value;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct FormProps {
    /// Which record form to render.
    pub kind: FormKind,

    /// `Create` starts from defaults; `Update` fills every field from `existing`.
    pub mode: FormMode,

    /// The stored record being edited. Only read in update mode.
    #[prop_or_default]
    pub existing: Option<Value>,

    /// Lookup lists for the selection controls. Read once, when the form opens.
    #[prop_or_default]
    pub reference: Option<ReferenceData>,

    /// Emitted when the form should be dismissed, after a success or on cancel.
    pub on_close: Callback<()>,

    /// Emitted after a successful submission so the parent reloads its records.
    pub on_refresh: Callback<()>,
}
