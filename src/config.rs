use std::path::PathBuf;

use clap::Args;
use url::Url;

use crate::errors::ConfigError;

pub const DEFAULT_TITLE: &str = "מובנה גלובל - שיווק השקעות";
pub const DEFAULT_PLACEHOLDER: &str = "איך אוכל לעזור לך היום?";
pub const DEFAULT_FALLBACK_MESSAGE: &str = "מצטער, אירעה שגיאה. אנא נסה שוב.";
pub const DEFAULT_ASSET_BASE: &str = "/widget";

const PLACEHOLDER_PREFIX: &str = "YOUR_";

/// Widget settings as read from flags or the environment.
#[derive(Debug, Clone, Args)]
pub struct WidgetArgs {
    /// Base URL of the chat backend, e.g. https://movne-bot.up.railway.app
    #[arg(long, env = "MOVNE_BACKEND_URL")]
    pub backend_url: Option<String>,

    #[arg(long, env = "MOVNE_WIDGET_TITLE", default_value = DEFAULT_TITLE)]
    pub title: String,

    #[arg(long, env = "MOVNE_WIDGET_PLACEHOLDER", default_value = DEFAULT_PLACEHOLDER)]
    pub placeholder: String,

    #[arg(long, env = "MOVNE_FALLBACK_MESSAGE", default_value = DEFAULT_FALLBACK_MESSAGE)]
    pub fallback_message: String,

    /// Where the compiled widget bundle is reachable from the host page.
    #[arg(long, env = "MOVNE_WIDGET_ASSET_BASE", default_value = DEFAULT_ASSET_BASE)]
    pub asset_base: String,
}

impl WidgetArgs {
    pub fn resolve(self) -> Result<WidgetConfig, ConfigError> {
        let raw = self.backend_url.ok_or(ConfigError::Missing)?;
        Ok(WidgetConfig {
            backend_url: parse_backend_url(&raw)?,
            title: self.title,
            placeholder: self.placeholder,
            fallback_message: self.fallback_message,
            asset_base: parse_asset_base(&self.asset_base)?,
        })
    }
}

/// Fully resolved widget configuration. Construction fails instead of
/// pointing the widget at an unconfigured placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub backend_url: Url,
    pub title: String,
    pub placeholder: String,
    pub fallback_message: String,
    /// Emitted unescaped into the snippet's module script.
    pub asset_base: String,
}

impl WidgetConfig {
    pub fn new(backend_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            backend_url: parse_backend_url(backend_url)?,
            title: DEFAULT_TITLE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            asset_base: DEFAULT_ASSET_BASE.to_string(),
        })
    }

    /// Backend base URL without a trailing slash, as embedded in the snippet.
    pub fn backend_base_url(&self) -> &str {
        self.backend_url.as_str().trim_end_matches('/')
    }
}

/// Settings for the `serve` subcommand.
#[derive(Debug, Clone, Args)]
pub struct ServerArgs {
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Directory holding the compiled widget bundle (trunk output).
    #[arg(long, env = "MOVNE_WIDGET_DIST", default_value = "frontend/dist")]
    pub dist_dir: PathBuf,

    /// Also answer `/api/chat` and `/health` locally, for development.
    #[arg(long)]
    pub stub_backend: bool,
}

pub fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ConfigError::Missing);
    }
    if is_placeholder(value) {
        return Err(ConfigError::Placeholder { value: value.to_string() });
    }

    let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        value: value.to_string(),
        source,
    })?;

    if url.host_str().is_some_and(is_placeholder) {
        return Err(ConfigError::Placeholder { value: value.to_string() });
    }

    let is_http = matches!(url.scheme(), "http" | "https");
    if !is_http || !url.has_host() || url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::NotABaseUrl { value: value.to_string() });
    }
    Ok(url)
}

/// Deployment placeholders look like `YOUR_RAILWAY_URL`; only the bare value
/// or the host is checked, paths may legitimately contain `your_`.
fn is_placeholder(value: &str) -> bool {
    value.to_ascii_uppercase().starts_with(PLACEHOLDER_PREFIX)
}

fn parse_asset_base(raw: &str) -> Result<String, ConfigError> {
    let value = raw.trim().trim_end_matches('/');
    if value.chars().any(|c| matches!(c, '"' | '\'' | '<' | '>' | '\\') || c.is_whitespace()) {
        return Err(ConfigError::AssetBase { value: raw.to_string() });
    }
    Ok(value.to_string())
}
