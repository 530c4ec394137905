use crate::app::App;

mod api;
mod app;
mod components;
mod form_sheet;

fn main() {
    yew::Renderer::<App>::new().render();
}
