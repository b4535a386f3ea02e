use crate::error::RecorderError;
use crate::recorder::session_record::{SessionEventKind, SessionRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use huddle_core::{ConnectionId, RoomId};
use serde::Serialize;

/// Sink for session analytics, implemented outside the signaling core.
///
/// Live signaling never waits on it: the hub only reaches it through a
/// `RecorderHandle`.
#[async_trait]
pub trait SessionRecorder: Send + Sync + 'static {
    async fn record(&self, record: SessionRecord) -> Result<(), RecorderError>;

    async fn summary(&self) -> Result<RecorderSummary, RecorderError>;
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatsCounters {
    pub total_connections: u64,
    pub total_rooms: u64,
    pub total_messages: u64,
    pub total_files_shared: u64,
    pub peak_concurrent_users: u64,
    pub updated_at: DateTime<Utc>,
}

impl Default for StatsCounters {
    fn default() -> Self {
        Self {
            total_connections: 0,
            total_rooms: 0,
            total_messages: 0,
            total_files_shared: 0,
            peak_concurrent_users: 0,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionRow {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: SessionEventKind,
    pub username: String,
    pub room_id: RoomId,
    pub connection_id: ConnectionId,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OnlineUser {
    pub connection_id: ConnectionId,
    pub username: String,
    pub room_id: RoomId,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderSummary {
    pub stats: StatsCounters,
    pub unique_users: usize,
    /// Newest first.
    pub sessions: Vec<SessionRow>,
    /// Most recently joined first.
    pub online: Vec<OnlineUser>,
}
