use serde::{Deserialize, Serialize};
use web_sys::Element;

/// Who wrote a transcript entry; only used for styling here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn css_class(&self) -> &'static str {
        match self {
            Sender::User => "user-message",
            Sender::Bot => "bot-message",
        }
    }
}

/// One transcript entry. Lives only as long as the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self { text: text.into(), sender: Sender::User }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self { text: text.into(), sender: Sender::Bot }
    }
}

/// Request body for `POST /api/chat`; `conversation_id` goes out as `null`
/// until the backend has assigned one.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: Option<String>,
}

/// Response from the chat backend.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: String,
}

/// Settings read from the `data-*` attributes of the embed root.
#[derive(Clone, Debug)]
pub struct WidgetConfig {
    pub backend_url: String,
    pub title: String,
    pub placeholder: String,
    pub fallback_message: String,
}

impl WidgetConfig {
    pub fn from_element(root: &Element) -> Result<Self, String> {
        let backend_url = root
            .get_attribute("data-backend-url")
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| "data-backend-url is missing".to_string())?;
        if is_placeholder(&backend_url) {
            return Err(format!("data-backend-url is still the placeholder '{backend_url}'"));
        }

        let attr = |name: &str, default: &str| {
            root.get_attribute(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            backend_url,
            title: attr("data-title", "מובנה גלובל - שיווק השקעות"),
            placeholder: attr("data-placeholder", "איך אוכל לעזור לך היום?"),
            fallback_message: attr("data-fallback", "מצטער, אירעה שגיאה. אנא נסה שוב."),
        })
    }
}

/// True for `YOUR_RAILWAY_URL` style values, bare or as the host; paths are
/// not looked at.
pub fn is_placeholder(backend_url: &str) -> bool {
    let rest = backend_url.split_once("://").map_or(backend_url, |(_, rest)| rest);
    let host = rest.split(['/', ':']).next().unwrap_or_default();
    host.to_ascii_uppercase().starts_with("YOUR_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_sends_null_until_assigned() {
        let req = ChatRequest { message: "hi".into(), conversation_id: None };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "message": "hi", "conversation_id": null })
        );
    }

    #[test]
    fn placeholder_detection_ignores_paths() {
        assert!(is_placeholder("YOUR_RAILWAY_URL"));
        assert!(is_placeholder("https://YOUR_RAILWAY_URL/api"));
        assert!(!is_placeholder("https://bots.example.com/your_bot"));
        assert!(!is_placeholder("http://localhost:8080"));
    }

    #[test]
    fn sender_classes_match_transcript_styling() {
        assert_eq!(Sender::User.css_class(), "user-message");
        assert_eq!(Sender::Bot.css_class(), "bot-message");
    }
}
