pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/meta/inspect", post(handlers::handle_inspect))
        .route("/api/v1/meta/generate", post(handlers::handle_generate))
        .route("/api/v1/meta/export", post(handlers::handle_export))
        .with_state(state)
}
