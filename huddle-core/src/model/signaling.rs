use crate::model::connection::ConnectionId;
use crate::model::member::Member;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

/// Frames sent by the browser. Each one is `{"event": ..., "data": {...}}`.
///
/// Session descriptions, candidates and file payloads stay as raw JSON: the
/// server never looks inside them. The relay envelopes keep `to` and the
/// payload optional so a half-formed envelope still parses and can be
/// rejected explicitly instead of failing the whole frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    Join { room_id: RoomId, username: String },
    Offer {
        #[serde(default)]
        offer: Option<Value>,
        #[serde(default)]
        to: Option<ConnectionId>,
    },
    Answer {
        #[serde(default)]
        answer: Option<Value>,
        #[serde(default)]
        to: Option<ConnectionId>,
    },
    IceCandidate {
        #[serde(default)]
        candidate: Option<Value>,
        #[serde(default)]
        to: Option<ConnectionId>,
    },
    ChatMessage { message: String },
    #[serde(rename_all = "camelCase")]
    FileShare {
        file_name: String,
        file_size: u64,
        file_type: String,
        file_data: Value,
    },
    #[serde(rename_all = "camelCase")]
    MuteStatus { audio_enabled: bool },
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::Join { .. } => "join",
            ClientEvent::Offer { .. } => "offer",
            ClientEvent::Answer { .. } => "answer",
            ClientEvent::IceCandidate { .. } => "ice-candidate",
            ClientEvent::ChatMessage { .. } => "chat-message",
            ClientEvent::FileShare { .. } => "file-share",
            ClientEvent::MuteStatus { .. } => "mute-status",
        }
    }
}

/// Frames pushed to the browser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// First frame on every connection: tells the client its own id.
    Connected { id: ConnectionId },
    JoinError { message: String },
    ExistingUsers { users: Vec<Member> },
    #[serde(rename_all = "camelCase")]
    UserJoined {
        user_id: ConnectionId,
        username: String,
    },
    #[serde(rename_all = "camelCase")]
    UserLeft { user_id: ConnectionId },
    Offer {
        offer: Value,
        from: ConnectionId,
        username: Option<String>,
    },
    Answer {
        answer: Value,
        from: ConnectionId,
        username: Option<String>,
    },
    IceCandidate {
        candidate: Value,
        from: ConnectionId,
    },
    #[serde(rename_all = "camelCase")]
    ChatMessage {
        username: String,
        message: String,
        timestamp: u64,
        is_system: bool,
    },
    #[serde(rename_all = "camelCase")]
    FileShare {
        username: String,
        file_name: String,
        file_size: u64,
        file_type: String,
        file_data: Value,
        timestamp: u64,
    },
    #[serde(rename_all = "camelCase")]
    MuteStatus {
        user_id: ConnectionId,
        audio_enabled: bool,
    },
}
