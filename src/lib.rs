use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

pub mod api;
pub mod error;
pub mod model;
pub mod prompts;
pub mod vision;

use vision::VisionClient;

/// Shared across all request handlers. The vision client is stateless and
/// long-lived, so one instance serves every request.
#[derive(Clone)]
pub struct AppState {
    pub vision: Arc<VisionClient>,
}

/// Full application router: API routes, static UI fallback, permissive CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(api::router())
        .fallback_service(ServeDir::new("static"))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}
