use crate::models::{ChatResponse, Message};

/// Client-side state of one conversation for the lifetime of a page view.
///
/// The conversation id is only ever taken from a backend response, and the
/// transcript only grows. Nothing here is persisted.
#[derive(Debug, Clone, Default)]
pub struct ConversationSession {
    conversation_id: Option<String>,
    is_open: bool,
    transcript: Vec<Message>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Returns `true` when the widget went from closed to open.
    pub fn open(&mut self) -> bool {
        let changed = !self.is_open;
        self.is_open = true;
        changed
    }

    /// Returns `true` when the widget went from open to closed.
    pub fn close(&mut self) -> bool {
        let changed = self.is_open;
        self.is_open = false;
        changed
    }

    pub fn push(&mut self, message: Message) -> &Message {
        self.transcript.push(message);
        &self.transcript[self.transcript.len() - 1]
    }

    /// Adopts the server-assigned id and appends the bot reply.
    pub fn accept(&mut self, response: ChatResponse) -> &Message {
        self.conversation_id = Some(response.conversation_id);
        self.push(Message::bot(response.response))
    }
}
