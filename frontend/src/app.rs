//! Application shell: one tab per record form, the stored records of the
//! selected form, and the form sheet for creating or editing a record.

use common::forms::FormKind;
use common::model::reference::ReferenceData;
use common::model::submission::FormMode;
use gloo_console::error;
use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{fetch_records, fetch_reference};
use crate::components::forms::{show_toast, FormComponent};
use crate::form_sheet::FormSheet;

pub enum Msg {
    SelectKind(FormKind),
    RecordsLoaded(FormKind, Vec<Value>),
    ReferenceLoaded(FormKind, ReferenceData),
    LoadFailed(String),
    OpenCreate,
    OpenEdit(usize),
    CloseForm,
    Refresh,
}

struct OpenForm {
    mode: FormMode,
    existing: Option<Value>,
}

pub struct App {
    kind: FormKind,
    records: Vec<Value>,
    reference: Option<ReferenceData>,
    open: Option<OpenForm>,
}

impl App {
    fn load(&self, ctx: &Context<Self>) {
        let kind = self.kind;

        let link = ctx.link().clone();
        spawn_local(async move {
            match fetch_records(kind).await {
                Ok(records) => link.send_message(Msg::RecordsLoaded(kind, records)),
                Err(err) => link.send_message(Msg::LoadFailed(format!("records: {}", err))),
            }
        });

        let link = ctx.link().clone();
        spawn_local(async move {
            match fetch_reference(kind).await {
                Ok(reference) => link.send_message(Msg::ReferenceLoaded(kind, reference)),
                Err(err) => link.send_message(Msg::LoadFailed(format!("reference data: {}", err))),
            }
        });
    }

    fn entity(kind: FormKind) -> &'static str {
        kind.definition()
            .map(|definition| definition.layout.entity)
            .unwrap_or(kind.as_str())
    }

    fn view_records(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let definition = match self.kind.definition() {
            Ok(definition) => definition,
            Err(err) => return html! { <p class="form-error">{ err.to_string() }</p> },
        };

        if self.records.is_empty() {
            return html! { <p class="empty">{ format!("No {} records yet.", self.kind) }</p> };
        }

        html! {
            <ul class="record-list">
                {
                    for self.records.iter().enumerate().map(|(index, record)| html! {
                        <li>
                            <span>{ definition.layout.summarize(record) }</span>
                            <button
                                class="btn-secondary"
                                onclick={link.callback(move |_| Msg::OpenEdit(index))}
                            >
                                {"Edit"}
                            </button>
                        </li>
                    })
                }
            </ul>
        }
    }

    fn view_form(&self, ctx: &Context<Self>) -> Html {
        let Some(open) = &self.open else {
            return html! {};
        };
        let link = ctx.link();

        html! {
            <FormSheet on_dismiss={link.callback(|_| Msg::CloseForm)}>
                <FormComponent
                    kind={self.kind}
                    mode={open.mode}
                    existing={open.existing.clone()}
                    reference={self.reference.clone()}
                    on_close={link.callback(|_| Msg::CloseForm)}
                    on_refresh={link.callback(|_| Msg::Refresh)}
                />
            </FormSheet>
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let app = Self {
            kind: FormKind::Announcement,
            records: Vec::new(),
            reference: None,
            open: None,
        };
        app.load(ctx);
        app
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectKind(kind) => {
                if kind == self.kind {
                    return false;
                }
                self.kind = kind;
                self.records.clear();
                self.reference = None;
                self.open = None;
                self.load(ctx);
                true
            }
            Msg::RecordsLoaded(kind, records) => {
                if kind != self.kind {
                    return false;
                }
                self.records = records;
                true
            }
            Msg::ReferenceLoaded(kind, reference) => {
                if kind != self.kind {
                    return false;
                }
                self.reference = Some(reference);
                true
            }
            Msg::LoadFailed(err) => {
                error!(format!("failed to load {}", err));
                show_toast("Could not reach the server.");
                false
            }
            Msg::OpenCreate => {
                self.open = Some(OpenForm {
                    mode: FormMode::Create,
                    existing: None,
                });
                true
            }
            Msg::OpenEdit(index) => match self.records.get(index) {
                Some(record) => {
                    self.open = Some(OpenForm {
                        mode: FormMode::Update,
                        existing: Some(record.clone()),
                    });
                    true
                }
                None => false,
            },
            Msg::CloseForm => {
                self.open = None;
                true
            }
            Msg::Refresh => {
                self.load(ctx);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="app-root">
                <nav class="tab-bar">
                    {
                        for FormKind::ALL.into_iter().map(|kind| html! {
                            <button
                                class={classes!("tab-btn", (kind == self.kind).then_some("active"))}
                                onclick={link.callback(move |_| Msg::SelectKind(kind))}
                            >
                                { Self::entity(kind) }
                            </button>
                        })
                    }
                </nav>
                <section class="records">
                    <div class="records-header">
                        <h2>{ Self::entity(self.kind) }</h2>
                        <button
                            class="btn-primary"
                            disabled={self.reference.is_none()}
                            onclick={link.callback(|_| Msg::OpenCreate)}
                        >
                            {"Add"}
                        </button>
                    </div>
                    { self.view_records(ctx) }
                </section>
                { self.view_form(ctx) }
            </div>
        }
    }
}
