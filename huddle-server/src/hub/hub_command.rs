use crate::registry::ClientMetadata;
use crate::room::RoomSnapshot;
use crate::signaling::{Envelope, EnvelopeKind, SharedFile};
use huddle_core::{ClientEvent, ConnectionId, RoomId, ServerEvent};
use tokio::sync::{mpsc, oneshot};

/// Everything the hub reacts to. Commands are handled one at a time, in
/// the order they were queued.
#[derive(Debug)]
pub enum HubCommand {
    /// A transport connected. Registers the connection, unjoined.
    Connect {
        connection_id: ConnectionId,
        outbound: mpsc::UnboundedSender<ServerEvent>,
        client: ClientMetadata,
    },

    Join {
        connection_id: ConnectionId,
        room_id: RoomId,
        username: String,
    },

    /// Offer, answer or ICE candidate addressed to one peer.
    Relay {
        connection_id: ConnectionId,
        envelope: Envelope,
    },

    Chat {
        connection_id: ConnectionId,
        message: String,
    },

    FileShare {
        connection_id: ConnectionId,
        file: SharedFile,
    },

    MuteStatus {
        connection_id: ConnectionId,
        audio_enabled: bool,
    },

    /// The transport went away. Forces leave and cleanup.
    Disconnect { connection_id: ConnectionId },

    /// Live room list for the admin view.
    Snapshot {
        reply: oneshot::Sender<Vec<RoomSnapshot>>,
    },
}

impl HubCommand {
    pub fn from_client_event(connection_id: ConnectionId, event: ClientEvent) -> Self {
        match event {
            ClientEvent::Join { room_id, username } => HubCommand::Join {
                connection_id,
                room_id,
                username,
            },
            ClientEvent::ChatMessage { message } => HubCommand::Chat {
                connection_id,
                message,
            },
            ClientEvent::FileShare {
                file_name,
                file_size,
                file_type,
                file_data,
            } => HubCommand::FileShare {
                connection_id,
                file: SharedFile {
                    file_name,
                    file_size,
                    file_type,
                    file_data,
                },
            },
            ClientEvent::MuteStatus { audio_enabled } => HubCommand::MuteStatus {
                connection_id,
                audio_enabled,
            },
            ClientEvent::Offer { offer, to } => HubCommand::Relay {
                connection_id,
                envelope: Envelope {
                    kind: EnvelopeKind::Offer,
                    to,
                    payload: offer,
                },
            },
            ClientEvent::Answer { answer, to } => HubCommand::Relay {
                connection_id,
                envelope: Envelope {
                    kind: EnvelopeKind::Answer,
                    to,
                    payload: answer,
                },
            },
            ClientEvent::IceCandidate { candidate, to } => HubCommand::Relay {
                connection_id,
                envelope: Envelope {
                    kind: EnvelopeKind::IceCandidate,
                    to,
                    payload: candidate,
                },
            },
        }
    }
}
