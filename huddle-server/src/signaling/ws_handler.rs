use crate::hub::HubHandle;
use crate::registry::ClientMetadata;
use crate::state::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{ConnectInfo, State, WebSocketUpgrade};
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use huddle_core::{ClientEvent, ConnectionId, ServerEvent};
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let client = ClientMetadata {
        user_agent: headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        ip: Some(addr.ip().to_string()),
    };

    ws.on_upgrade(move |socket| handle_socket(socket, client, state.hub))
}

async fn handle_socket(socket: WebSocket, client: ClientMetadata, hub: HubHandle) {
    let connection_id = ConnectionId::new();
    info!("New WebSocket connection: {} from {:?}", connection_id, client.ip);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    if let Err(e) = hub.connect(connection_id, tx, client).await {
        error!("Cannot register {}: {}", connection_id, e);
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize server event: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let hub = hub.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => {
                            debug!("{} -> {}", connection_id, event.name());
                            if let Err(e) = hub.dispatch(connection_id, event).await {
                                error!("Hub unavailable: {}", e);
                                break;
                            }
                        }
                        Err(e) => warn!("Malformed frame from {}: {}", connection_id, e),
                    },
                    Message::Binary(_) => {
                        warn!("Binary frame from {} ignored", connection_id)
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Whichever side ended first, the hub has to forget this connection.
    let _ = hub.disconnect(connection_id).await;
    info!("WebSocket disconnected: {}", connection_id);
}
