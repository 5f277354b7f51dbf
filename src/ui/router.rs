//! Route table for the chat relay.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::{handler, state::AppState};

/// Build the full application router: the auth endpoints, the chat
/// protocol upgrade, and static assets under `/`.
pub fn build_router(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(handler::health_check))
        .route("/register", post(handler::register_user))
        .route("/login", post(handler::login_user))
        .route("/websocket", get(handler::websocket_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
