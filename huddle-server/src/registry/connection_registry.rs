use crate::error::JoinError;
use crate::registry::connection::{ClientMetadata, Connection, Identity};
use huddle_core::{ConnectionId, RoomId, ServerEvent};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Every live transport session and the identity it joined with.
///
/// This is the source of truth for "is this connection still alive".
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a freshly connected, not yet joined client.
    pub fn register(
        &mut self,
        id: ConnectionId,
        outbound: mpsc::UnboundedSender<ServerEvent>,
        client: ClientMetadata,
    ) -> bool {
        if self.connections.contains_key(&id) {
            warn!("Connection {} registered twice, keeping the first", id);
            return false;
        }

        self.connections
            .insert(id, Connection::new(id, outbound, client));
        true
    }

    /// Bind a display name and room to a connection.
    ///
    /// Fails when another joined connection of the same room already uses
    /// the name (exact, case-sensitive match).
    pub fn assign_identity(
        &mut self,
        id: &ConnectionId,
        display_name: &str,
        room_id: &RoomId,
    ) -> Result<(), JoinError> {
        if !self.connections.contains_key(id) {
            return Err(JoinError::NotConnected);
        }

        let taken = self.connections.values().any(|c| {
            c.id != *id
                && c.identity
                    .as_ref()
                    .is_some_and(|i| i.room_id == *room_id && i.display_name == display_name)
        });
        if taken {
            return Err(JoinError::NameTaken);
        }

        if let Some(connection) = self.connections.get_mut(id) {
            connection.identity = Some(Identity {
                display_name: display_name.to_owned(),
                room_id: room_id.clone(),
            });
        }
        Ok(())
    }

    /// Forget a connection. Returns the identity it had joined with, if any.
    /// Calling it again for the same id is a no-op.
    pub fn unregister(&mut self, id: &ConnectionId) -> Option<Identity> {
        self.connections.remove(id).and_then(|c| c.identity)
    }

    pub fn is_alive(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn identity(&self, id: &ConnectionId) -> Option<&Identity> {
        self.connections.get(id).and_then(|c| c.identity.as_ref())
    }

    pub fn client(&self, id: &ConnectionId) -> Option<&ClientMetadata> {
        self.connections.get(id).map(|c| &c.client)
    }

    /// Push one event to one connection. Returns whether it was queued.
    pub fn deliver(&self, id: &ConnectionId, event: ServerEvent) -> bool {
        let Some(connection) = self.connections.get(id) else {
            debug!("Dropping event for unknown connection {}", id);
            return false;
        };

        if connection.send(event) {
            return true;
        }
        warn!("Outbound channel of {} is closed, event dropped", id);
        false
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn joined_count(&self) -> usize {
        self.connections.values().filter(|c| c.is_joined()).count()
    }
}
