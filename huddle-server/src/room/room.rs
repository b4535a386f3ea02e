use huddle_core::{ConnectionId, Member, RoomId};
use serde::Serialize;

/// One live room. Members are kept in join order.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    members: Vec<Member>,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            members: Vec::new(),
        }
    }

    // Rooms are call-sized, a scan is fine.
    pub fn has_name(&self, username: &str) -> bool {
        self.members.iter().any(|m| m.username == username)
    }

    pub fn insert(&mut self, member: Member) {
        self.members.push(member);
    }

    pub fn remove(&mut self, id: &ConnectionId) -> Option<Member> {
        let index = self.members.iter().position(|m| m.id == *id)?;
        Some(self.members.remove(index))
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Read-only view of a room for the admin dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub users: Vec<Member>,
    pub user_count: usize,
}

impl From<&Room> for RoomSnapshot {
    fn from(room: &Room) -> Self {
        Self {
            room_id: room.id.clone(),
            users: room.members.clone(),
            user_count: room.members.len(),
        }
    }
}
