use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::HOST;
use serde_json::{Value, json};

/// ICE servers for the browser's `RTCPeerConnection`.
pub async fn webrtc_config(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(host_without_port)
        .unwrap_or("localhost");

    Json(json!({ "iceServers": state.config.ice_servers_for_host(host) }))
}

pub fn host_without_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.split(':').next().unwrap_or(host)
}
