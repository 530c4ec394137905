//! Collaborators handed to the workflow, plus small DOM helpers.

use common::forms::workflow::{FormHost, NotificationSink};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::Callback;

/// Displays a transient message at the bottom of the page for 3 seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Notifications go to the page toast.
pub struct ToastSink;

impl NotificationSink for ToastSink {
    fn notify(&self, message: &str) {
        show_toast(message);
    }
}

/// Forwards the workflow's close and refresh signals to the parent's callbacks.
pub struct CallbackHost {
    pub on_close: Callback<()>,
    pub on_refresh: Callback<()>,
}

impl FormHost for CallbackHost {
    fn close(&self) {
        self.on_close.emit(());
    }

    fn refresh(&self) {
        self.on_refresh.emit(());
    }
}

/// Current value of the `<input>`, `<select>` or `<textarea>` that fired `event`.
pub fn control_value(event: &Event) -> Option<String> {
    let target = event.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    target
        .dyn_ref::<HtmlTextAreaElement>()
        .map(HtmlTextAreaElement::value)
}

/// First file picked in the `<input type="file">` that fired `event`.
pub fn selected_file(event: &Event) -> Option<web_sys::File> {
    event
        .target()?
        .dyn_ref::<HtmlInputElement>()?
        .files()?
        .get(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn host_signals_reach_the_parent_callbacks() {
        let closed = Rc::new(Cell::new(0));
        let refreshed = Rc::new(Cell::new(0));
        let host = CallbackHost {
            on_close: {
                let closed = closed.clone();
                Callback::from(move |_| closed.set(closed.get() + 1))
            },
            on_refresh: {
                let refreshed = refreshed.clone();
                Callback::from(move |_| refreshed.set(refreshed.get() + 1))
            },
        };

        host.close();
        host.refresh();
        host.refresh();

        assert_eq!((closed.get(), refreshed.get()), (1, 2));
    }
}
