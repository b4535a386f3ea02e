use anyhow::{Context, Result};
use tokio::sync::mpsc;

use huddle_core::{ClientEvent, ConnectionId, Member, RoomId, ServerEvent};
use huddle_server::{ClientMetadata, HubHandle};

use super::hub_helpers::{EVENT_TIMEOUT_MS, sync};

/// A fake browser: talks to the hub the way the WebSocket task does.
pub struct TestConnection {
    pub id: ConnectionId,
    hub: HubHandle,
    rx: mpsc::UnboundedReceiver<ServerEvent>,
}

impl TestConnection {
    /// Register with the hub and consume the `connected` greeting.
    pub async fn connect(hub: &HubHandle) -> Result<Self> {
        Self::connect_with(hub, ClientMetadata::default()).await
    }

    pub async fn connect_with(hub: &HubHandle, client: ClientMetadata) -> Result<Self> {
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::unbounded_channel();

        hub.connect(id, tx, client)
            .await
            .context("Failed to register connection")?;

        let mut connection = Self {
            id,
            hub: hub.clone(),
            rx,
        };

        match connection.recv().await? {
            ServerEvent::Connected { id: greeted } if greeted == id => Ok(connection),
            other => anyhow::bail!("Expected connected greeting, got {:?}", other),
        }
    }

    pub async fn send(&self, event: ClientEvent) -> Result<()> {
        self.hub
            .dispatch(self.id, event)
            .await
            .context("Failed to dispatch client event")
    }

    pub async fn join(&self, room: &str, username: &str) -> Result<()> {
        self.send(ClientEvent::Join {
            room_id: RoomId::from(room),
            username: username.to_owned(),
        })
        .await
    }

    /// Join and return the `existing-users` list, skipping the system notice.
    pub async fn join_ok(&mut self, room: &str, username: &str) -> Result<Vec<Member>> {
        self.join(room, username).await?;

        let users = match self.recv().await? {
            ServerEvent::ExistingUsers { users } => users,
            other => anyhow::bail!("Expected existing-users, got {:?}", other),
        };
        match self.recv().await? {
            ServerEvent::ChatMessage {
                is_system: true, ..
            } => Ok(users),
            other => anyhow::bail!("Expected join notice, got {:?}", other),
        }
    }

    pub async fn chat(&self, message: &str) -> Result<()> {
        self.send(ClientEvent::ChatMessage {
            message: message.to_owned(),
        })
        .await
    }

    /// Next event, or an error after `EVENT_TIMEOUT_MS`.
    pub async fn recv(&mut self) -> Result<ServerEvent> {
        let timeout = std::time::Duration::from_millis(EVENT_TIMEOUT_MS);

        match tokio::time::timeout(timeout, self.rx.recv()).await {
            Ok(Some(event)) => Ok(event),
            Ok(None) => anyhow::bail!("Event channel closed"),
            Err(_) => anyhow::bail!("Timeout waiting for event on {}", self.id),
        }
    }

    /// Everything delivered so far, after letting the hub catch up.
    pub async fn drain(&mut self) -> Vec<ServerEvent> {
        sync(&self.hub).await;

        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Drop the transport side and tell the hub, like a closed socket.
    pub async fn disconnect(self) -> Result<()> {
        self.hub
            .disconnect(self.id)
            .await
            .context("Failed to send disconnect")
    }
}
