
use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use huddle_server::{AppState, ServerConfig};

use crate::utils::{MockSessionRecorder, spawn_hub};

pub fn create_test_state(config: ServerConfig) -> (AppState, MockSessionRecorder) {
    let recorder = MockSessionRecorder::new();
    let hub = spawn_hub(Arc::new(recorder.clone()), 64);
    (AppState::new(hub, Arc::new(recorder.clone()), config), recorder)
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
