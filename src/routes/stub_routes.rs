//! Local stand-in for the chat backend, speaking the same `/api/chat`
//! contract. Replies by echoing; only meant for development and tests.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::models::{ChatRequest, ChatResponse};

/// POST `/api/chat` — assigns a conversation id on the first turn, echoes it after
pub async fn chat_handler(Json(request): Json<ChatRequest>) -> Response {
    let message = request.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Field 'message' cannot be empty" })),
        )
            .into_response();
    }

    let conversation_id = request
        .conversation_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let preview: String = message.chars().take(50).collect();
    info!(%conversation_id, "stub backend received message: {preview}...");

    Json(ChatResponse {
        response: format!("Echo: {message}"),
        conversation_id,
    })
    .into_response()
}

/// GET `/health`
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}
