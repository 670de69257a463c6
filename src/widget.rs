use tracing::{debug, warn};

use crate::config::WidgetConfig;
use crate::errors::RelayError;
use crate::models::{ChatRequest, ChatResponse, Message};
use crate::relay::ChatBackend;
use crate::session::ConversationSession;

const PREVIEW_CHARS: usize = 50;

/// A submitted message whose backend reply has not been applied yet.
///
/// The request captures the conversation id as it was at submit time, so
/// several exchanges can be in flight and resolve in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExchange {
    request: ChatRequest,
}

impl PendingExchange {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// First 50 characters of the submitted text, for log lines.
    pub fn preview(&self) -> String {
        self.request.message.chars().take(PREVIEW_CHARS).collect()
    }
}

/// The chat bubble: visibility, the conversation session and the relay to
/// the backend. Owns exactly one [`ConversationSession`].
#[derive(Debug)]
pub struct ChatRelayWidget<B> {
    backend: B,
    session: ConversationSession,
    fallback_message: String,
}

impl<B: ChatBackend> ChatRelayWidget<B> {
    pub fn new(backend: B, config: &WidgetConfig) -> Self {
        Self::with_fallback(backend, config.fallback_message.clone())
    }

    pub fn with_fallback(backend: B, fallback_message: impl Into<String>) -> Self {
        Self {
            backend,
            session: ConversationSession::new(),
            fallback_message: fallback_message.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn transcript(&self) -> &[Message] {
        self.session.transcript()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.session.conversation_id()
    }

    pub fn fallback_message(&self) -> &str {
        &self.fallback_message
    }

    /// Shows the panel and hides the trigger. Repeated calls are no-ops.
    pub fn open(&mut self) {
        if self.session.open() {
            debug!("chat widget opened");
        }
    }

    pub fn close(&mut self) {
        if self.session.close() {
            debug!("chat widget closed");
        }
    }

    /// Synchronous half of a submit: records the user message and captures
    /// the request. Whitespace-only input is ignored.
    pub fn begin_submit(&mut self, text: &str) -> Option<PendingExchange> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.session.push(Message::user(text));
        Some(PendingExchange {
            request: ChatRequest {
                message: text.to_string(),
                conversation_id: self.session.conversation_id().map(str::to_string),
            },
        })
    }

    /// Applies the backend outcome of an exchange and returns the appended
    /// bot message. Failures become the fallback message and leave the
    /// conversation id untouched.
    pub fn complete(
        &mut self,
        exchange: PendingExchange,
        outcome: Result<ChatResponse, RelayError>,
    ) -> &Message {
        match outcome {
            Ok(response) => self.session.accept(response),
            Err(err) => {
                warn!(
                    kind = err.kind(),
                    error = %err,
                    message = %exchange.preview(),
                    conversation_id = ?exchange.request.conversation_id,
                    "chat relay failed, showing fallback"
                );
                let fallback = Message::bot(self.fallback_message.clone());
                self.session.push(fallback)
            }
        }
    }

    /// Full submit cycle against the widget's own backend. Returns the bot
    /// reply, or `None` when the input was blank.
    pub async fn submit_message(&mut self, text: &str) -> Option<&Message> {
        let exchange = self.begin_submit(text)?;
        let outcome = self.backend.send(exchange.request()).await;
        Some(self.complete(exchange, outcome))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::Sender;

    const FALLBACK: &str = "מצטער, אירעה שגיאה. אנא נסה שוב.";

    /// Replays canned outcomes and records every request it sees.
    #[derive(Default)]
    struct ScriptedBackend {
        outcomes: Mutex<VecDeque<Result<ChatResponse, RelayError>>>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedBackend {
        fn reply(self, response: &str, conversation_id: &str) -> Self {
            self.outcomes.lock().unwrap().push_back(Ok(ChatResponse {
                response: response.into(),
                conversation_id: conversation_id.into(),
            }));
            self
        }

        fn fail(self, err: RelayError) -> Self {
            self.outcomes.lock().unwrap().push_back(Err(err));
            self
        }

        fn seen(&self) -> Vec<ChatRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, RelayError> {
            self.seen.lock().unwrap().push(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RelayError::Backend { status: 503 }))
        }
    }

    fn widget(backend: ScriptedBackend) -> ChatRelayWidget<ScriptedBackend> {
        ChatRelayWidget::with_fallback(backend, FALLBACK)
    }

    #[tokio::test]
    async fn scenario_first_exchange_adopts_server_id() {
        let backend = ScriptedBackend::default()
            .reply("We offer investment marketing.", "abc123")
            .reply("Sure.", "abc123");
        let mut w = widget(backend);

        w.submit_message("What services do you offer?").await;
        assert_eq!(
            w.transcript(),
            &[
                Message::user("What services do you offer?"),
                Message::bot("We offer investment marketing."),
            ]
        );
        assert_eq!(w.conversation_id(), Some("abc123"));

        w.submit_message("Tell me more").await;
        let seen = w.backend().seen();
        assert_eq!(seen[0].conversation_id, None);
        assert_eq!(seen[1].conversation_id.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn each_request_echoes_previous_response_id() {
        let backend = ScriptedBackend::default()
            .reply("1", "c-1")
            .reply("2", "c-2")
            .reply("3", "c-3")
            .reply("4", "c-4");
        let mut w = widget(backend);

        for text in ["a", "b", "c", "d"] {
            w.submit_message(text).await;
        }

        let ids: Vec<_> = w.backend().seen().into_iter().map(|r| r.conversation_id).collect();
        assert_eq!(
            ids,
            vec![None, Some("c-1".into()), Some("c-2".into()), Some("c-3".into())]
        );
        assert_eq!(w.conversation_id(), Some("c-4"));
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let mut w = widget(ScriptedBackend::default().reply("x", "y"));

        assert!(w.submit_message("   \t\n").await.is_none());
        assert!(w.submit_message("").await.is_none());
        assert!(w.transcript().is_empty());
        assert!(w.backend().seen().is_empty());
    }

    #[tokio::test]
    async fn input_is_trimmed_before_sending() {
        let mut w = widget(ScriptedBackend::default().reply("ok", "id"));
        w.submit_message("  hello  ").await;
        assert_eq!(w.transcript()[0], Message::user("hello"));
        assert_eq!(w.backend().seen()[0].message, "hello");
    }

    #[tokio::test]
    async fn failure_shows_fallback_and_keeps_id() {
        let backend = ScriptedBackend::default()
            .reply("hi", "keep-me")
            .fail(RelayError::Backend { status: 500 });
        let mut w = widget(backend);
        w.submit_message("first").await;

        let reply = w.submit_message("hello").await.cloned();
        assert_eq!(reply, Some(Message::bot(FALLBACK)));
        assert_eq!(w.conversation_id(), Some("keep-me"));
        assert_eq!(&w.transcript()[2..], &[Message::user("hello"), Message::bot(FALLBACK)]);
    }

    #[tokio::test]
    async fn every_error_kind_collapses_to_same_fallback() {
        let backend = ScriptedBackend::default()
            .fail(RelayError::Backend { status: 502 })
            .fail(RelayError::protocol("expected value at line 1 column 1"));
        let mut w = widget(backend);

        w.submit_message("one").await;
        w.submit_message("two").await;

        let bots: Vec<_> = w.transcript().iter().filter(|m| m.sender == Sender::Bot).collect();
        assert_eq!(bots.len(), 2);
        assert!(bots.iter().all(|m| m.text == FALLBACK));
        assert_eq!(w.conversation_id(), None);
        // Still no id after failures, so the next request starts fresh.
        assert!(w.backend().seen().iter().all(|r| r.conversation_id.is_none()));
    }

    #[tokio::test]
    async fn transcript_grows_by_submissions_plus_replies() {
        let backend = ScriptedBackend::default()
            .reply("a", "1")
            .fail(RelayError::Backend { status: 500 })
            .reply("c", "1");
        let mut w = widget(backend);

        for text in ["x", "  ", "y", "z"] {
            w.submit_message(text).await;
        }

        assert_eq!(w.transcript().len(), 6);
        for pair in w.transcript().chunks(2) {
            assert_eq!(pair[0].sender, Sender::User);
            assert_eq!(pair[1].sender, Sender::Bot);
        }
    }

    #[test]
    fn user_message_is_visible_before_reply() {
        let mut w = widget(ScriptedBackend::default());
        let pending = w.begin_submit("hello");
        assert!(pending.is_some());
        assert_eq!(w.transcript(), &[Message::user("hello")]);
    }

    #[test]
    fn out_of_order_completion_appends_in_arrival_order() {
        let mut w = widget(ScriptedBackend::default());
        let first = w.begin_submit("first").unwrap();
        let second = w.begin_submit("second").unwrap();
        assert_eq!(first.request().conversation_id, None);
        assert_eq!(second.request().conversation_id, None);

        w.complete(
            second,
            Ok(ChatResponse { response: "to second".into(), conversation_id: "s".into() }),
        );
        w.complete(
            first,
            Ok(ChatResponse { response: "to first".into(), conversation_id: "f".into() }),
        );

        let texts: Vec<_> = w.transcript().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "to second", "to first"]);
        assert_eq!(w.conversation_id(), Some("f"));
    }

    #[test]
    fn exchange_preview_is_char_bounded() {
        let mut w = widget(ScriptedBackend::default());
        let long = "ש".repeat(80);
        let exchange = w.begin_submit(&long).unwrap();
        assert_eq!(exchange.preview().chars().count(), 50);

        let reply = w.complete(exchange, Err(RelayError::Backend { status: 500 }));
        assert_eq!(reply, &Message::bot(FALLBACK));
    }

    #[test]
    fn open_twice_stays_open() {
        let mut w = widget(ScriptedBackend::default());
        assert!(!w.is_open());
        w.open();
        w.open();
        assert!(w.is_open());
        w.close();
        assert!(!w.is_open());
    }
}
