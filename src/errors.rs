use thiserror::Error;

/// Failure of a single relay round trip.
/// The widget collapses every variant into the same fallback message; the
/// distinction only exists for diagnostics and tests.
#[derive(Debug, Error)]
pub enum RelayError {
    // ── Transport ────────────────────────────────────────────────────────────
    #[error("Network error talking to chat backend: {0}")]
    Network(#[source] reqwest::Error),

    // ── HTTP status ──────────────────────────────────────────────────────────
    #[error("Chat backend answered with status {status}")]
    Backend { status: u16 },

    // ── Body ─────────────────────────────────────────────────────────────────
    #[error("Malformed chat backend response: {message}")]
    Protocol { message: String },
}

impl RelayError {
    pub fn protocol(message: impl Into<String>) -> Self {
        RelayError::Protocol { message: message.into() }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, RelayError::Network(_))
    }

    pub fn is_backend(&self) -> bool {
        matches!(self, RelayError::Backend { .. })
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, RelayError::Protocol { .. })
    }

    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Network(_) => "network",
            RelayError::Backend { .. } => "backend",
            RelayError::Protocol { .. } => "protocol",
        }
    }
}

/// Rejected widget configuration, raised while resolving settings at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Backend URL is not set (use --backend-url or MOVNE_BACKEND_URL)")]
    Missing,

    #[error("Backend URL '{value}' is still the deployment placeholder")]
    Placeholder { value: String },

    #[error("Backend URL '{value}' is not a valid URL: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Backend URL '{value}' must be an http(s) base URL without query or fragment")]
    NotABaseUrl { value: String },

    #[error("Widget asset base '{value}' contains characters not allowed in a script URL")]
    AssetBase { value: String },
}
