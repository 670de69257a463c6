use gloo_net::http::Request;

use crate::models::{ChatRequest, ChatResponse};

/// Sends one chat turn to `{backend_url}/api/chat`.
pub async fn send_chat(
    backend_url: &str,
    message: &str,
    conversation_id: Option<&str>,
) -> Result<ChatResponse, String> {
    let body = ChatRequest {
        message: message.to_string(),
        conversation_id: conversation_id.map(|s| s.to_string()),
    };

    let resp = Request::post(&format!("{backend_url}/api/chat"))
        .json(&body)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<ChatResponse>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}
