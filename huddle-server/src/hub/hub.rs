use crate::error::{JoinError, SignalError};
use crate::hub::hub_command::HubCommand;
use crate::recorder::{FileMetadata, RecorderHandle, SessionEventKind, SessionRecord};
use crate::registry::{ClientMetadata, ConnectionRegistry};
use crate::room::{RoomDirectory, RoomSnapshot};
use crate::signaling::{Envelope, RoomEventBroadcaster, SharedFile, relay};
use huddle_core::{ConnectionId, Member, RoomId, ServerEvent};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Owner of all signaling state.
///
/// One task drains the command queue and applies each command fully before
/// taking the next, so a join's name check and insert can never interleave
/// with another event, and every member of a room sees that room's events
/// in the same order.
pub struct Hub {
    registry: ConnectionRegistry,
    directory: RoomDirectory,
    broadcaster: RoomEventBroadcaster,
    recorder: RecorderHandle,
    command_rx: mpsc::Receiver<HubCommand>,
}

impl Hub {
    pub fn new(command_rx: mpsc::Receiver<HubCommand>, recorder: RecorderHandle) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            directory: RoomDirectory::new(),
            broadcaster: RoomEventBroadcaster::new(),
            recorder,
            command_rx,
        }
    }

    pub async fn run(mut self) {
        info!("Hub event loop started");

        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command);
        }

        info!(
            "Hub event loop finished ({} connections, {} joined, {} rooms left)",
            self.registry.len(),
            self.registry.joined_count(),
            self.directory.len()
        );
    }

    fn handle_command(&mut self, command: HubCommand) {
        match command {
            HubCommand::Connect {
                connection_id,
                outbound,
                client,
            } => self.handle_connect(connection_id, outbound, client),

            HubCommand::Join {
                connection_id,
                room_id,
                username,
            } => self.handle_join(connection_id, room_id, username),

            HubCommand::Relay {
                connection_id,
                envelope,
            } => self.handle_relay(connection_id, envelope),

            HubCommand::Chat {
                connection_id,
                message,
            } => self.handle_chat(connection_id, message),

            HubCommand::FileShare {
                connection_id,
                file,
            } => self.handle_file_share(connection_id, file),

            HubCommand::MuteStatus {
                connection_id,
                audio_enabled,
            } => self.handle_mute_status(connection_id, audio_enabled),

            HubCommand::Disconnect { connection_id } => self.handle_disconnect(connection_id),

            HubCommand::Snapshot { reply } => self.handle_snapshot(reply),
        }
    }

    fn handle_connect(
        &mut self,
        connection_id: ConnectionId,
        outbound: mpsc::UnboundedSender<ServerEvent>,
        client: ClientMetadata,
    ) {
        if !self.registry.register(connection_id, outbound, client) {
            return;
        }

        info!("Connection {} registered", connection_id);
        self.registry.deliver(
            &connection_id,
            ServerEvent::Connected { id: connection_id },
        );
    }

    fn handle_join(&mut self, connection_id: ConnectionId, room_id: RoomId, username: String) {
        let room_id = RoomId::from(room_id.as_str().trim());
        let username = username.trim().to_owned();
        if room_id.is_empty() || username.is_empty() {
            warn!("Join from {} without room or username, ignored", connection_id);
            return;
        }
        if !self.registry.is_alive(&connection_id) {
            warn!("Join from unregistered connection {}, ignored", connection_id);
            return;
        }
        if let Some(identity) = self.registry.identity(&connection_id) {
            warn!(
                "Connection {} already joined '{}', second join ignored",
                connection_id, identity.room_id
            );
            return;
        }

        let accepted = match self.directory.join(&room_id, connection_id, &username) {
            Ok(accepted) => accepted,
            Err(e) => return self.reject_join(connection_id, &room_id, &username, e),
        };

        if let Err(e) = self
            .registry
            .assign_identity(&connection_id, &username, &room_id)
        {
            self.directory.leave(&connection_id);
            return self.reject_join(connection_id, &room_id, &username, e);
        }

        info!(
            "{} joined room '{}' as {:?}",
            connection_id, room_id, username
        );

        let joiner = Member::new(connection_id, username.clone());
        self.broadcaster
            .announce_join(&self.registry, &room_id, &joiner, &accepted.existing);

        if accepted.created {
            self.record(SessionRecord::new(
                SessionEventKind::RoomCreated,
                username.clone(),
                room_id.clone(),
                connection_id,
            ));
        }

        let client = self.registry.client(&connection_id).cloned().unwrap_or_default();
        self.record(
            SessionRecord::new(SessionEventKind::Join, username, room_id, connection_id)
                .with_client(client),
        );
    }

    fn reject_join(
        &self,
        connection_id: ConnectionId,
        room_id: &RoomId,
        username: &str,
        error: JoinError,
    ) {
        match error {
            JoinError::NameTaken => {
                info!(
                    "Join of {} to '{}' as {:?} rejected: name taken",
                    connection_id, room_id, username
                );
                self.registry.deliver(
                    &connection_id,
                    ServerEvent::JoinError {
                        message: error.to_string(),
                    },
                );
            }
            other => warn!("Join of {} to '{}' refused: {}", connection_id, room_id, other),
        }
    }

    fn handle_relay(&mut self, connection_id: ConnectionId, envelope: Envelope) {
        match relay(&self.registry, &connection_id, envelope) {
            Ok(()) => {}
            Err(SignalError::UnknownRecipient(to)) => {
                debug!("Dropping envelope from {} to vanished {}", connection_id, to);
            }
            Err(e) => warn!("Dropping envelope from {}: {}", connection_id, e),
        }
    }

    fn handle_chat(&mut self, connection_id: ConnectionId, message: String) {
        let Some((room_id, username)) = self.joined(&connection_id, "chat-message") else {
            return;
        };

        let members = self.directory.members_of(&room_id);
        self.broadcaster
            .relay_chat(&self.registry, &room_id, &username, message, &members);

        self.record(SessionRecord::new(
            SessionEventKind::ChatMessage,
            username,
            room_id,
            connection_id,
        ));
    }

    fn handle_file_share(&mut self, connection_id: ConnectionId, file: SharedFile) {
        let Some((room_id, username)) = self.joined(&connection_id, "file-share") else {
            return;
        };

        let metadata = FileMetadata {
            file_name: file.file_name.clone(),
            file_size: file.file_size,
        };
        info!(
            "{} shares {:?} ({} bytes declared) in '{}'",
            username, metadata.file_name, metadata.file_size, room_id
        );

        let members = self.directory.members_of(&room_id);
        self.broadcaster
            .relay_file(&self.registry, &room_id, &username, file, &members);

        let client = self.registry.client(&connection_id).cloned().unwrap_or_default();
        self.record(
            SessionRecord::new(SessionEventKind::FileShare, username, room_id, connection_id)
                .with_client(client)
                .with_file(metadata),
        );
    }

    fn handle_mute_status(&mut self, connection_id: ConnectionId, audio_enabled: bool) {
        let Some((room_id, _)) = self.joined(&connection_id, "mute-status") else {
            return;
        };

        let members = self.directory.members_of(&room_id);
        self.broadcaster.relay_mute_status(
            &self.registry,
            &room_id,
            &connection_id,
            audio_enabled,
            &members,
        );
    }

    fn handle_disconnect(&mut self, connection_id: ConnectionId) {
        let client = self.registry.client(&connection_id).cloned();
        let remaining_room = self.directory.leave(&connection_id);
        let identity = self.registry.unregister(&connection_id);

        let Some(identity) = identity else {
            if client.is_some() {
                info!("Connection {} closed before joining", connection_id);
            } else {
                debug!("Disconnect for unknown connection {}", connection_id);
            }
            return;
        };

        info!(
            "{} ({:?}) left room '{}'",
            connection_id, identity.display_name, identity.room_id
        );

        if let Some(room_id) = remaining_room {
            let remaining = self.directory.members_of(&room_id);
            let departed = Member::new(connection_id, identity.display_name.clone());
            self.broadcaster
                .announce_leave(&self.registry, &room_id, &departed, &remaining);
        }

        self.record(
            SessionRecord::new(
                SessionEventKind::Disconnect,
                identity.display_name,
                identity.room_id,
                connection_id,
            )
            .with_client(client.unwrap_or_default()),
        );
    }

    fn handle_snapshot(&self, reply: oneshot::Sender<Vec<RoomSnapshot>>) {
        if reply.send(self.directory.snapshot()).is_err() {
            debug!("Snapshot requester went away");
        }
    }

    /// Room and display name of a joined connection, or `None` (logged)
    /// for one that has not joined.
    fn joined(&self, connection_id: &ConnectionId, event: &str) -> Option<(RoomId, String)> {
        match self.registry.identity(connection_id) {
            Some(identity) => Some((identity.room_id.clone(), identity.display_name.clone())),
            None => {
                debug!(
                    "Ignoring {}: {}",
                    event,
                    SignalError::NotJoined(*connection_id)
                );
                None
            }
        }
    }

    // Fire and forget; the handle logs anything it had to drop.
    fn record(&self, record: SessionRecord) {
        let _ = self.recorder.dispatch(record);
    }
}
