pub mod embed_routes;
pub mod stub_routes;

use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::WidgetConfig;

/// Widget host: demo page, embed snippet and the compiled bundle under `/widget`.
pub fn widget_router(config: Arc<WidgetConfig>, dist_dir: &Path) -> Router {
    Router::new()
        .route("/", get(embed_routes::index_handler))
        .route("/embed", get(embed_routes::embed_handler))
        .nest_service("/widget", ServeDir::new(dist_dir))
        .with_state(config)
}

/// The backend contract answered locally. CORS is open because the widget
/// posts from whatever origin hosts it.
pub fn stub_backend_router() -> Router {
    Router::new()
        .route("/api/chat", post(stub_routes::chat_handler))
        .route("/health", get(stub_routes::health_handler))
        .layer(CorsLayer::permissive())
}

pub fn app(config: Arc<WidgetConfig>, dist_dir: &Path, stub_backend: bool) -> Router {
    let mut app = widget_router(config, dist_dir);
    if stub_backend {
        app = app.merge(stub_backend_router());
    }
    app.layer(TraceLayer::new_for_http())
}
