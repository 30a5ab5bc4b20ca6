use axum::routing::{get, post};
use axum::Router;

use crate::AppState;

pub mod handlers;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/generate", post(handlers::generate))
        .route("/api/generate/stream", post(handlers::generate_stream))
        .route("/health", get(handlers::health))
}
