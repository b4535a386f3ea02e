use crate::model::connection::ConnectionId;
use serde::{Deserialize, Serialize};

/// A joined connection as seen by the other members of its room.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Member {
    pub id: ConnectionId,
    pub username: String,
}

impl Member {
    pub fn new(id: ConnectionId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}
