use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::errors::RelayError;
use crate::models::{ChatRequest, ChatResponse};

/// One request/response exchange with the chat backend.
#[async_trait]
pub trait ChatBackend {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, RelayError>;
}

/// `POST {base}/api/chat` over HTTP with a JSON body.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpChatBackend {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: Url, http: reqwest::Client) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Probes `GET {base}/health`; any 2xx counts as healthy.
    pub async fn health(&self) -> Result<u16, RelayError> {
        let resp = self
            .http
            .get(self.endpoint("health"))
            .send()
            .await
            .map_err(RelayError::Network)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RelayError::Backend { status: status.as_u16() });
        }
        Ok(status.as_u16())
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, RelayError> {
        let url = self.endpoint("api/chat");
        debug!(%url, has_conversation = request.conversation_id.is_some(), "relaying chat message");

        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(RelayError::Network)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RelayError::Backend { status: status.as_u16() });
        }

        let body = resp.bytes().await.map_err(RelayError::Network)?;
        serde_json::from_slice::<ChatResponse>(&body)
            .map_err(|e| RelayError::protocol(e.to_string()))
    }
}
