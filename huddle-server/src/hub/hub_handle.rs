use crate::error::HubError;
use crate::hub::hub::Hub;
use crate::hub::hub_command::HubCommand;
use crate::recorder::RecorderHandle;
use crate::registry::ClientMetadata;
use crate::room::RoomSnapshot;
use huddle_core::{ClientEvent, ConnectionId, ServerEvent};
use tokio::sync::{mpsc, oneshot};
use tracing::info;

/// Cloneable entry point to the hub task.
#[derive(Clone)]
pub struct HubHandle {
    command_tx: mpsc::Sender<HubCommand>,
}

impl HubHandle {
    /// Start a hub task and return its handle. The hub stops once every
    /// handle is dropped.
    pub fn spawn(recorder: RecorderHandle, capacity: usize) -> Self {
        let (command_tx, command_rx) = mpsc::channel(capacity.max(1));
        let hub = Hub::new(command_rx, recorder);

        info!("Spawning signaling hub");
        tokio::spawn(hub.run());

        Self { command_tx }
    }

    pub async fn send(&self, command: HubCommand) -> Result<(), HubError> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| HubError::Closed)
    }

    pub async fn connect(
        &self,
        connection_id: ConnectionId,
        outbound: mpsc::UnboundedSender<ServerEvent>,
        client: ClientMetadata,
    ) -> Result<(), HubError> {
        self.send(HubCommand::Connect {
            connection_id,
            outbound,
            client,
        })
        .await
    }

    pub async fn dispatch(
        &self,
        connection_id: ConnectionId,
        event: ClientEvent,
    ) -> Result<(), HubError> {
        self.send(HubCommand::from_client_event(connection_id, event))
            .await
    }

    pub async fn disconnect(&self, connection_id: ConnectionId) -> Result<(), HubError> {
        self.send(HubCommand::Disconnect { connection_id }).await
    }

    pub async fn snapshot(&self) -> Result<Vec<RoomSnapshot>, HubError> {
        let (reply, rx) = oneshot::channel();
        self.send(HubCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| HubError::Closed)
    }
}
