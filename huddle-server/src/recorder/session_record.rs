use crate::registry::ClientMetadata;
use huddle_core::{ConnectionId, RoomId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SessionEventKind {
    Join,
    Disconnect,
    FileShare,
    ChatMessage,
    RoomCreated,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileMetadata {
    pub file_name: String,
    pub file_size: u64,
}

/// One notification for the session log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub kind: SessionEventKind,
    pub username: String,
    pub room_id: RoomId,
    pub connection_id: ConnectionId,
    pub client: ClientMetadata,
    pub file: Option<FileMetadata>,
}

impl SessionRecord {
    pub fn new(
        kind: SessionEventKind,
        username: impl Into<String>,
        room_id: RoomId,
        connection_id: ConnectionId,
    ) -> Self {
        Self {
            kind,
            username: username.into(),
            room_id,
            connection_id,
            client: ClientMetadata::default(),
            file: None,
        }
    }

    pub fn with_client(mut self, client: ClientMetadata) -> Self {
        self.client = client;
        self
    }

    pub fn with_file(mut self, file: FileMetadata) -> Self {
        self.file = Some(file);
        self
    }
}
