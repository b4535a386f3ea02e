pub mod connection_tests;
pub mod http_tests;
pub mod messaging_tests;

use std::sync::Arc;

use tracing::Level;

use huddle_server::HubHandle;

use crate::utils::{MockSessionRecorder, spawn_hub};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_hub() -> (HubHandle, MockSessionRecorder) {
    let recorder = MockSessionRecorder::new();
    let hub = spawn_hub(Arc::new(recorder.clone()), 64);
    (hub, recorder)
}
