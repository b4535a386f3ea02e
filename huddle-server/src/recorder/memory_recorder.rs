use crate::error::RecorderError;
use crate::recorder::session_record::{SessionEventKind, SessionRecord};
use crate::recorder::session_recorder::{
    OnlineUser, RecorderSummary, SessionRecorder, SessionRow, StatsCounters,
};
use async_trait::async_trait;
use chrono::Utc;
use huddle_core::ConnectionId;
use std::collections::{HashMap, HashSet, VecDeque};
use tokio::sync::Mutex;

pub const DEFAULT_RECENT_SESSIONS: usize = 100;

#[derive(Default)]
struct MemoryState {
    stats: StatsCounters,
    next_row_id: u64,
    sessions: VecDeque<SessionRow>,
    online: HashMap<ConnectionId, OnlineUser>,
    usernames: HashSet<String>,
}

/// Process-local analytics store. Nothing survives a restart.
pub struct MemoryRecorder {
    state: Mutex<MemoryState>,
    recent_limit: usize,
}

impl MemoryRecorder {
    pub fn new(recent_limit: usize) -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            recent_limit,
        }
    }
}

impl Default for MemoryRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_SESSIONS)
    }
}

impl MemoryState {
    fn push_row(&mut self, record: &SessionRecord, limit: usize) {
        self.next_row_id += 1;
        let file = record.file.as_ref();

        self.sessions.push_front(SessionRow {
            id: self.next_row_id,
            kind: record.kind,
            username: record.username.clone(),
            room_id: record.room_id.clone(),
            connection_id: record.connection_id,
            user_agent: record.client.user_agent.clone(),
            ip: record.client.ip.clone(),
            file_name: file.map(|f| f.file_name.clone()),
            file_size: file.map(|f| f.file_size),
            timestamp: Utc::now(),
        });
        self.sessions.truncate(limit);
        self.usernames.insert(record.username.clone());
    }
}

#[async_trait]
impl SessionRecorder for MemoryRecorder {
    async fn record(&self, record: SessionRecord) -> Result<(), RecorderError> {
        let mut state = self.state.lock().await;

        match record.kind {
            SessionEventKind::Join => {
                state.push_row(&record, self.recent_limit);
                state.stats.total_connections += 1;
                state.online.insert(
                    record.connection_id,
                    OnlineUser {
                        connection_id: record.connection_id,
                        username: record.username.clone(),
                        room_id: record.room_id.clone(),
                        joined_at: Utc::now(),
                    },
                );
                let online = state.online.len() as u64;
                state.stats.peak_concurrent_users = state.stats.peak_concurrent_users.max(online);
            }
            SessionEventKind::Disconnect => {
                state.push_row(&record, self.recent_limit);
                state.online.remove(&record.connection_id);
            }
            SessionEventKind::FileShare => {
                state.push_row(&record, self.recent_limit);
                state.stats.total_files_shared += 1;
            }
            SessionEventKind::ChatMessage => state.stats.total_messages += 1,
            SessionEventKind::RoomCreated => state.stats.total_rooms += 1,
        }

        state.stats.updated_at = Utc::now();
        Ok(())
    }

    async fn summary(&self) -> Result<RecorderSummary, RecorderError> {
        let state = self.state.lock().await;

        let mut online: Vec<OnlineUser> = state.online.values().cloned().collect();
        online.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));

        Ok(RecorderSummary {
            stats: state.stats.clone(),
            unique_users: state.usernames.len(),
            sessions: state.sessions.iter().cloned().collect(),
            online,
        })
    }
}
