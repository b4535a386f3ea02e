mod admin;
mod analytics;
mod webrtc_config;

pub use admin::*;
pub use analytics::*;
pub use webrtc_config::*;

use crate::signaling::ws_handler;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/webrtc-config", get(webrtc_config))
        .route("/health", get(health))
        .route("/admin/login", post(admin_login))
        .route("/admin/logout", post(admin_logout))
        .route("/admin/check", get(admin_check))
        .route("/api/admin/analytics", get(admin_analytics))
        .layer(cors)
        .with_state(state)
}

pub async fn health() -> &'static str {
    "ok"
}
