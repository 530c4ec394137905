//! Update function for the record form component.
//!
//! Elm-style: each `Msg` is applied to the component's `FormWorkflow` and the
//! return value tells Yew whether to re-render. Network calls run in
//! `spawn_local` and report back through the component link.

use common::forms::workflow::SubmitBlocked;
use gloo_console::{error, log};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{upload_file, HttpActions};

use super::helpers::{show_toast, CallbackHost, ToastSink};
use super::messages::Msg;
use super::state::FormComponent;

pub fn update(component: &mut FormComponent, ctx: &Context<FormComponent>, msg: Msg) -> bool {
    let Some(workflow) = component.workflow.as_mut() else {
        return false;
    };

    match msg {
        Msg::SetField(key, value) => {
            workflow.set_field(key, value);
            true
        }
        Msg::Submit => match workflow.prepare() {
            Ok(submission) => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = submission.dispatch(&HttpActions).await;
                    link.send_message(Msg::Submitted {
                        ticket: submission.ticket,
                        result,
                    });
                });
                true
            }
            Err(SubmitBlocked::Invalid(errors)) => {
                log!(format!("{}: {} invalid field(s)", workflow.kind(), errors.len()));
                true
            }
            Err(SubmitBlocked::Closed) => false,
            Err(blocked) => {
                show_toast(&blocked.to_string());
                false
            }
        },
        Msg::Submitted { ticket, result } => {
            let props = ctx.props();
            let host = CallbackHost {
                on_close: props.on_close.clone(),
                on_refresh: props.on_refresh.clone(),
            };
            workflow.resolve(ticket, result, &ToastSink, &host);
            true
        }
        Msg::Cancel => {
            workflow.close();
            ctx.props().on_close.emit(());
            false
        }
        Msg::FileSelected(file) => {
            if !workflow.begin_upload() {
                return false;
            }
            let link = ctx.link().clone();
            spawn_local(async move {
                match upload_file(file).await {
                    Ok(uploaded) => link.send_message(Msg::Uploaded(uploaded.url)),
                    Err(err) => link.send_message(Msg::UploadFailed(err)),
                }
            });
            true
        }
        Msg::Uploaded(url) => {
            workflow.complete_upload(url);
            true
        }
        Msg::UploadFailed(err) => {
            error!(format!("upload failed: {}", err));
            workflow.fail_upload();
            show_toast("The file could not be uploaded.");
            true
        }
    }
}
