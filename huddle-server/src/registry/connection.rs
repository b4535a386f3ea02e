use huddle_core::{ConnectionId, RoomId, ServerEvent};
use serde::Serialize;
use tokio::sync::mpsc;

/// What the transport told us about the client when it connected.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ClientMetadata {
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

/// Display name and room bound to a connection by a successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub display_name: String,
    pub room_id: RoomId,
}

pub struct Connection {
    pub id: ConnectionId,
    pub client: ClientMetadata,
    pub identity: Option<Identity>,
    outbound: mpsc::UnboundedSender<ServerEvent>,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        outbound: mpsc::UnboundedSender<ServerEvent>,
        client: ClientMetadata,
    ) -> Self {
        Self {
            id,
            client,
            identity: None,
            outbound,
        }
    }

    pub fn is_joined(&self) -> bool {
        self.identity.is_some()
    }

    /// Queue an event for the socket writer. Never blocks; `false` means the
    /// writer side is already gone.
    pub fn send(&self, event: ServerEvent) -> bool {
        self.outbound.send(event).is_ok()
    }
}
