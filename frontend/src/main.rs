mod api;
mod components;
mod models;
mod state;

use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use components::widget::ChatWidget;
use models::WidgetConfig;
use state::WidgetState;

/// Element the embed snippet leaves for the widget to mount into.
const ROOT_ID: &str = "movne-chat-root";

/// Root application component.
#[component]
fn App(config: WidgetConfig) -> impl IntoView {
    WidgetState::provide(config);

    view! { <ChatWidget /> }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");

    let Some(root) = document().get_element_by_id(ROOT_ID) else {
        log::error!("#{ROOT_ID} not found; the embed snippet was not injected");
        return;
    };

    let config = match WidgetConfig::from_element(&root) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Chat widget not started: {e}");
            return;
        }
    };

    match root.dyn_into::<web_sys::HtmlElement>() {
        Ok(root) => mount_to(root, move || view! { <App config /> }).forget(),
        Err(_) => log::error!("#{ROOT_ID} is not an HTML element"),
    }
}
