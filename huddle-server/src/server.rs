use crate::config::ServerConfig;
use crate::http::router;
use crate::hub::HubHandle;
use crate::recorder::{MemoryRecorder, RecorderHandle, SessionRecorder};
use crate::state::AppState;
use crate::tls::rustls_config;
use anyhow::{Context, Result};
use axum_server::Handle;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    let recorder: Arc<dyn SessionRecorder> = Arc::new(MemoryRecorder::new(config.recent_sessions));
    serve_on(listener, config, recorder).await
}

/// Serve on an already bound listener with the given analytics backend.
///
/// Speaks HTTPS when the configuration names a certificate and key, plain
/// HTTP otherwise.
pub async fn serve_on(
    listener: TcpListener,
    config: ServerConfig,
    recorder: Arc<dyn SessionRecorder>,
) -> Result<()> {
    let tls = match &config.tls {
        Some(paths) => Some(rustls_config(paths).context("Failed to load TLS certificate")?),
        None => None,
    };

    let (recorder_handle, _recorder_task) =
        RecorderHandle::spawn(recorder.clone(), config.recorder_capacity);
    let hub = HubHandle::spawn(recorder_handle, config.hub_capacity);

    let state = AppState::new(hub, recorder, config);
    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();

    let addr = listener.local_addr().context("Listener has no local address")?;

    match tls {
        None => {
            info!("Signaling server listening on http://{}", addr);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .context("HTTP server failed")?;
        }
        Some(tls) => {
            info!("Signaling server listening on https://{}", addr);

            let handle = Handle::new();
            tokio::spawn({
                let handle = handle.clone();
                async move {
                    shutdown_signal().await;
                    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
                }
            });

            let listener = listener
                .into_std()
                .context("Failed to hand listener to the TLS server")?;
            axum_server::from_tcp_rustls(listener, tls)
                .handle(handle)
                .serve(app)
                .await
                .context("HTTPS server failed")?;
        }
    }

    info!("Signaling server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
