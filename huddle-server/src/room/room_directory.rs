use crate::error::JoinError;
use crate::room::room::{Room, RoomSnapshot};
use huddle_core::{ConnectionId, Member, RoomId};
use std::collections::HashMap;
use tracing::{debug, info};

/// Result of an accepted join.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinAccepted {
    /// Members present before this join, in join order.
    pub existing: Vec<Member>,
    /// Whether this join materialized the room.
    pub created: bool,
}

/// Canonical room membership.
///
/// A room exists exactly while it has at least one member: the first join
/// creates it and the last leave drops it.
#[derive(Default)]
pub struct RoomDirectory {
    rooms: HashMap<RoomId, Room>,
    memberships: HashMap<ConnectionId, RoomId>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a room, creating the room if needed.
    ///
    /// On error nothing changes: the room is not created and no member is
    /// inserted.
    pub fn join(
        &mut self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        username: &str,
    ) -> Result<JoinAccepted, JoinError> {
        if self.memberships.contains_key(&connection_id) {
            return Err(JoinError::AlreadyJoined);
        }

        let (existing, created) = match self.rooms.get(room_id) {
            Some(room) if room.has_name(username) => return Err(JoinError::NameTaken),
            Some(room) => (room.members().to_vec(), false),
            None => (Vec::new(), true),
        };

        let room = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating room '{}'", room_id);
            Room::new(room_id.clone())
        });
        room.insert(Member::new(connection_id, username));
        self.memberships.insert(connection_id, room_id.clone());

        debug!(
            "{} joined '{}' as {:?} ({} members)",
            connection_id,
            room_id,
            username,
            room.len()
        );

        Ok(JoinAccepted { existing, created })
    }

    /// Remove a connection from whatever room it is in.
    ///
    /// Returns the room id while members remain to be told about it; `None`
    /// when the connection was not in a room or the room just emptied.
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Option<RoomId> {
        let room_id = self.memberships.remove(connection_id)?;
        let room = self.rooms.get_mut(&room_id)?;
        room.remove(connection_id);

        if room.is_empty() {
            self.rooms.remove(&room_id);
            info!("Room '{}' is empty, dropped", room_id);
            return None;
        }
        Some(room_id)
    }

    /// Members of a room in join order. Unknown rooms are simply empty.
    pub fn members_of(&self, room_id: &RoomId) -> Vec<Member> {
        self.rooms
            .get(room_id)
            .map(|room| room.members().to_vec())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// All rooms, ordered by id.
    pub fn snapshot(&self) -> Vec<RoomSnapshot> {
        let mut rooms: Vec<RoomSnapshot> = self.rooms.values().map(RoomSnapshot::from).collect();
        rooms.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        rooms
    }
}
