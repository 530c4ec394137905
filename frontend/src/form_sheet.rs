use uuid::Uuid;
use yew::{html, Callback, Component, Context, Html, MouseEvent, Properties};

/// Sliding sheet that hosts an open form above the record list.
pub struct FormSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    /// Emitted when the backdrop is clicked.
    pub on_dismiss: Callback<()>,
}

impl Component for FormSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_dismiss = ctx.props().on_dismiss.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_dismiss.emit(()));

        html! {
            <>
                <div class="sheet-backdrop" {onclick} />
                <div class="top-sheet show" id={self.id.clone()}>
                    { ctx.props().children.clone() }
                </div>
            </>
        }
    }
}
