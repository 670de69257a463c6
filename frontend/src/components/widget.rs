use leptos::ev;
use leptos::html;
use leptos::prelude::*;

use crate::models::Message;
use crate::state::WidgetState;

/// Trigger bubble plus the chat panel. Only one of the two is on the page.
#[component]
pub fn ChatWidget() -> impl IntoView {
    let state = expect_context::<WidgetState>();

    view! {
        <Show
            when=move || state.is_open.get()
            fallback=move || view! {
                <div id="movne-chat-button" on:click=move |_| state.open()>"💬"</div>
            }
        >
            <ChatPanel />
        </Show>
    }
}

/// Header, transcript and the Enter-to-send input.
#[component]
fn ChatPanel() -> impl IntoView {
    let state = expect_context::<WidgetState>();
    let messages_ref = NodeRef::<html::Div>::new();

    // Keep the newest message in view after every append
    Effect::new(move |_| {
        state.transcript.track();
        if let Some(container) = messages_ref.get() {
            container.set_scroll_top(container.scroll_height());
        }
    });

    view! {
        <div id="movne-chat-widget">
            <div id="movne-chat-header">
                <span>{state.title()}</span>
                <button id="movne-chat-close" on:click=move |_| state.close()>"×"</button>
            </div>
            <div id="movne-chat-messages" node_ref=messages_ref>
                <For
                    each=move || state.transcript.get().into_iter().enumerate()
                    key=|(i, _)| *i
                    children=|(_, msg)| view! { <MessageBubble msg /> }
                />
            </div>
            <ChatInput />
        </div>
    }
}

/// A transcript node, classed by sender for styling.
#[component]
fn MessageBubble(msg: Message) -> impl IntoView {
    let css_class = format!("message {}", msg.sender.css_class());

    view! { <div class=css_class>{msg.text}</div> }
}

#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<WidgetState>();
    let (input, set_input) = signal(String::new());

    let on_keypress = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && state.submit_message(&input.get_untracked()) {
            set_input.set(String::new());
        }
    };

    view! {
        <div id="movne-chat-input">
            <input
                type="text"
                placeholder=state.placeholder()
                prop:value=input
                on:input=move |ev| {
                    set_input.set(event_target_value(&ev));
                }
                on:keypress=on_keypress
            />
        </div>
    }
}
