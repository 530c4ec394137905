//! Record form: one Yew component that renders and drives any of the six
//! record forms from its definition.
//!
//! Responsibilities
//! - Build a `FormWorkflow` from the props when the component is created.
//! - Delegate message handling to `update::update` and rendering to `view::view`.
//! - Rebuild the workflow when the parent opens a different record or form.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use helpers::show_toast;
pub use messages::Msg;
pub use props::FormProps;
pub use state::FormComponent;

impl Component for FormComponent {
    type Message = Msg;
    type Properties = FormProps;

    fn create(ctx: &Context<Self>) -> Self {
        FormComponent::new(ctx.props())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.kind != old_props.kind
            || props.mode != old_props.mode
            || props.existing != old_props.existing
        {
            *self = FormComponent::new(props);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
