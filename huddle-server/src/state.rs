use crate::config::ServerConfig;
use crate::http::AdminAuth;
use crate::hub::HubHandle;
use crate::recorder::SessionRecorder;
use std::sync::Arc;

/// Shared by every HTTP and WebSocket handler.
#[derive(Clone)]
pub struct AppState {
    pub hub: HubHandle,
    pub recorder: Arc<dyn SessionRecorder>,
    pub admin: AdminAuth,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(hub: HubHandle, recorder: Arc<dyn SessionRecorder>, config: ServerConfig) -> Self {
        Self {
            hub,
            recorder,
            admin: AdminAuth::new(config.admin.clone(), config.is_tls()),
            config: Arc::new(config),
        }
    }
}
