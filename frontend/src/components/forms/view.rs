//! View rendering for the record form component.
//!
//! Controls are generated from the form's layout: one per visible field, in
//! layout order, followed by the attachment control when the form has one.
//! Field errors are only shown after a submit attempt.

use common::forms::layout::{Attachment, FieldLayout, Widget};
use common::forms::workflow::{AttachmentState, FormWorkflow};
use common::model::reference::ReferenceData;
use common::model::submission::FormMode;
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::{control_value, selected_file};
use super::messages::Msg;
use super::state::FormComponent;

pub fn view(component: &FormComponent, ctx: &Context<FormComponent>) -> Html {
    let link = ctx.link();
    let Some(workflow) = component.workflow.as_ref() else {
        return html! {
            <div class="form-root">
                <p class="form-error">{ component.load_error.clone().unwrap_or_default() }</p>
                <button type="button" onclick={link.callback(|_| Msg::Cancel)}>{"Close"}</button>
            </div>
        };
    };

    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });
    let reference = ctx.props().reference.as_ref();
    let layout = &workflow.definition().layout;

    html! {
        <form class="form-root" {onsubmit}>
            <h1 class="form-heading">{ workflow.heading() }</h1>
            <div class="form-grid">
                {
                    for layout
                        .visible_fields(workflow.mode())
                        .map(|field| build_field(workflow, field, reference, link))
                }
            </div>
            {
                match &layout.attachment {
                    Some(attachment) => build_attachment(component, workflow, attachment, link),
                    None => html! {},
                }
            }
            { build_form_error(workflow) }
            <div class="form-actions">
                <button
                    type="button"
                    class="btn-secondary"
                    onclick={link.callback(|_| Msg::Cancel)}
                >
                    {"Cancel"}
                </button>
                <button type="submit" class="btn-primary" disabled={workflow.is_submitting()}>
                    { submit_label(workflow) }
                </button>
            </div>
        </form>
    }
}

fn submit_label(workflow: &FormWorkflow) -> &'static str {
    match (workflow.is_submitting(), workflow.mode()) {
        (true, _) => "Saving...",
        (false, FormMode::Create) => "Create",
        (false, FormMode::Update) => "Update",
    }
}

fn build_field(
    workflow: &FormWorkflow,
    field: &FieldLayout,
    reference: Option<&ReferenceData>,
    link: &Scope<FormComponent>,
) -> Html {
    let key = field.key;
    let value = workflow.value(key).to_string();
    let onchange =
        link.batch_callback(move |e: Event| control_value(&e).map(|v| Msg::SetField(key, v)));
    let oninput =
        link.batch_callback(move |e: InputEvent| control_value(&e).map(|v| Msg::SetField(key, v)));

    let control = match field.widget {
        Widget::Hidden => {
            return html! { <input type="hidden" name={key} value={value} /> };
        }
        Widget::Input(input_type) => html! {
            <input
                id={key}
                name={key}
                type={input_type.as_html()}
                value={value}
                {oninput}
            />
        },
        Widget::TextArea => html! {
            <textarea id={key} name={key} rows="3" value={value} {oninput} />
        },
        Widget::Choice(_) | Widget::Reference { .. } => {
            let options = field.widget.options(reference);
            html! {
                <select id={key} name={key} disabled={workflow.is_disabled(key)} {onchange}>
                    {
                        for options.into_iter().map(|option| html! {
                            <option
                                value={option.value.clone()}
                                disabled={option.disabled}
                                selected={!option.disabled && option.value == value}
                            >
                                { option.label }
                            </option>
                        })
                    }
                </select>
            }
        }
    };

    html! {
        <div class={classes!("form-field", field.wide.then_some("wide"))}>
            <label for={key}>{ field.label }</label>
            { control }
            {
                match workflow.error(key) {
                    Some(message) => html! { <p class="field-error">{ message }</p> },
                    None => html! {},
                }
            }
        </div>
    }
}

fn build_attachment(
    component: &FormComponent,
    workflow: &FormWorkflow,
    attachment: &Attachment,
    link: &Scope<FormComponent>,
) -> Html {
    let file_input_ref = component.file_input_ref.clone();
    let open_picker = Callback::from(move |_: MouseEvent| {
        if let Some(input) = file_input_ref.cast::<web_sys::HtmlInputElement>() {
            input.click();
        }
    });
    let onchange = link.batch_callback(|e: Event| selected_file(&e).map(Msg::FileSelected));

    let status = match workflow.attachment() {
        AttachmentState::Empty => html! {},
        AttachmentState::Uploading => html! { <span class="upload-status">{"Uploading..."}</span> },
        AttachmentState::Ready(url) => html! {
            <a class="upload-status" href={url.clone()} target="_blank">{"Current file"}</a>
        },
    };

    html! {
        <div class="form-attachment">
            <label>{ attachment.caption }</label>
            <input
                type="file"
                accept={attachment.accept}
                style="display: none;"
                ref={component.file_input_ref.clone()}
                {onchange}
            />
            <button
                type="button"
                class="btn-secondary"
                disabled={*workflow.attachment() == AttachmentState::Uploading}
                onclick={open_picker}
            >
                { attachment.prompt }
            </button>
            { status }
            {
                match workflow.error(attachment.key) {
                    Some(message) => html! { <p class="field-error">{ message }</p> },
                    None => html! {},
                }
            }
        </div>
    }
}

fn build_form_error(workflow: &FormWorkflow) -> Html {
    match workflow.result().error.as_deref() {
        Some(message) if !workflow.result().success => html! {
            <p class="form-error">{ message.to_string() }</p>
        },
        _ => html! {},
    }
}
