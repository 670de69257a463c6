use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::{ChatResponse, Message, WidgetConfig};

/// The page's single conversation session, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct WidgetState {
    // --- Read signals (for components to subscribe to) ---
    pub is_open: ReadSignal<bool>,
    pub conversation_id: ReadSignal<Option<String>>,
    pub transcript: ReadSignal<Vec<Message>>,

    // --- Write signals (for mutating state) ---
    set_is_open: WriteSignal<bool>,
    set_conversation_id: WriteSignal<Option<String>>,
    set_transcript: WriteSignal<Vec<Message>>,

    config: StoredValue<WidgetConfig>,
}

impl WidgetState {
    /// Create a new `WidgetState` and provide it in the current Leptos context.
    pub fn provide(config: WidgetConfig) -> Self {
        let (is_open, set_is_open) = signal(false);
        let (conversation_id, set_conversation_id) = signal(None::<String>);
        let (transcript, set_transcript) = signal(Vec::<Message>::new());

        let state = Self {
            is_open,
            conversation_id,
            transcript,
            set_is_open,
            set_conversation_id,
            set_transcript,
            config: StoredValue::new(config),
        };

        provide_context(state);
        state
    }

    pub fn title(&self) -> String {
        self.config.with_value(|c| c.title.clone())
    }

    pub fn placeholder(&self) -> String {
        self.config.with_value(|c| c.placeholder.clone())
    }

    pub fn open(&self) {
        if !self.is_open.get_untracked() {
            self.set_is_open.set(true);
        }
    }

    pub fn close(&self) {
        self.set_is_open.set(false);
    }

    /// Appends the user message right away and relays it in the background.
    /// Returns `false` for blank input, which is neither shown nor sent.
    pub fn submit_message(&self, text: &str) -> bool {
        let Some(text) = outgoing_text(text) else {
            return false;
        };

        self.set_transcript.update(|msgs| msgs.push(Message::user(text.clone())));
        let conv_id = self.conversation_id.get_untracked();
        let state = *self;

        spawn_local(async move {
            let backend_url = state.config.with_value(|c| c.backend_url.clone());
            let outcome = api::send_chat(&backend_url, &text, conv_id.as_deref()).await;
            if let Err(e) = &outcome {
                log::error!("Chat relay failed: {e}");
            }

            let fallback = state.config.with_value(|c| c.fallback_message.clone());
            let (new_id, reply) = reply_for(outcome, &fallback);
            if new_id.is_some() {
                state.set_conversation_id.set(new_id);
            }
            state.set_transcript.update(|msgs| msgs.push(reply));
        });
        true
    }
}

/// Trimmed text to send, or `None` when the input is blank.
fn outgoing_text(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Bot message for a relay outcome, plus the conversation id to adopt.
/// Failures yield the fallback and no id, so the current one is kept.
fn reply_for(
    outcome: Result<ChatResponse, String>,
    fallback: &str,
) -> (Option<String>, Message) {
    match outcome {
        Ok(resp) => (Some(resp.conversation_id), Message::bot(resp.response)),
        Err(_) => (None, Message::bot(fallback)),
    }
}
