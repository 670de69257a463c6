use std::sync::Arc;

use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::config::WidgetConfig;

// ── Template structs ──────────────────────────────────────────────────────────

/// The markup + script block a host page injects once, right before `</body>`.
#[derive(Template)]
#[template(path = "embed.html")]
pub struct EmbedTemplate<'a> {
    backend_url: &'a str,
    title: &'a str,
    placeholder: &'a str,
    fallback_message: &'a str,
    asset_base: &'a str,
}

impl<'a> From<&'a WidgetConfig> for EmbedTemplate<'a> {
    fn from(cfg: &'a WidgetConfig) -> Self {
        Self {
            backend_url: cfg.backend_base_url(),
            title: &cfg.title,
            placeholder: &cfg.placeholder,
            fallback_message: &cfg.fallback_message,
            asset_base: &cfg.asset_base,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    page_title: &'a str,
    snippet: String,
}

/// Renders the embed snippet for `cfg`.
pub fn render_snippet(cfg: &WidgetConfig) -> Result<String, askama::Error> {
    EmbedTemplate::from(cfg).render()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET `/` — demo host page with the widget injected at the end of the body
pub async fn index_handler(State(cfg): State<Arc<WidgetConfig>>) -> Response {
    let page = render_snippet(&cfg).and_then(|snippet| {
        IndexTemplate { page_title: &cfg.title, snippet }.render()
    });
    into_html(page)
}

/// GET `/embed` — the snippet alone, for pasting into a CMS footer
pub async fn embed_handler(State(cfg): State<Arc<WidgetConfig>>) -> Response {
    into_html(render_snippet(&cfg))
}

// ── Helper ────────────────────────────────────────────────────────────────────

fn into_html(rendered: Result<String, askama::Error>) -> Response {
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Template error: {e}"),
        )
            .into_response(),
    }
}
