use crate::registry::ConnectionRegistry;
use crate::signaling::event_clock::EventClock;
use huddle_core::{ConnectionId, Member, RoomId, ServerEvent};
use serde_json::Value;
use tracing::{debug, warn};

pub const SYSTEM_USERNAME: &str = "System";

/// A file shared into a room. The server does not check `file_size`
/// against the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedFile {
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
    pub file_data: Value,
}

/// Fans membership, chat, file and mute events out to room members.
///
/// Works on member snapshots handed in by the caller and never touches
/// membership itself. A failed delivery to one member is logged and the
/// rest still get the event.
#[derive(Debug, Default)]
pub struct RoomEventBroadcaster {
    clock: EventClock,
}

impl RoomEventBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tell `existing` about `joiner`, hand the joiner the pre-join member
    /// list, then post a system chat line to everyone including the joiner.
    pub fn announce_join(
        &mut self,
        registry: &ConnectionRegistry,
        room_id: &RoomId,
        joiner: &Member,
        existing: &[Member],
    ) {
        registry.deliver(
            &joiner.id,
            ServerEvent::ExistingUsers {
                users: existing.to_vec(),
            },
        );

        let joined = ServerEvent::UserJoined {
            user_id: joiner.id,
            username: joiner.username.clone(),
        };
        fan_out(registry, room_id, existing.iter(), &joined);

        let notice = self.system_message(format!("{} joined the room", joiner.username));
        fan_out(
            registry,
            room_id,
            existing.iter().chain(std::iter::once(joiner)),
            &notice,
        );
    }

    /// Tell the remaining members that `departed` is gone. Nothing is sent
    /// when nobody remains.
    pub fn announce_leave(
        &mut self,
        registry: &ConnectionRegistry,
        room_id: &RoomId,
        departed: &Member,
        remaining: &[Member],
    ) {
        if remaining.is_empty() {
            return;
        }

        let left = ServerEvent::UserLeft {
            user_id: departed.id,
        };
        fan_out(registry, room_id, remaining.iter(), &left);

        let notice = self.system_message(format!("{} left the room", departed.username));
        fan_out(registry, room_id, remaining.iter(), &notice);
    }

    /// Chat goes to every member, the sender included.
    pub fn relay_chat(
        &mut self,
        registry: &ConnectionRegistry,
        room_id: &RoomId,
        sender_name: &str,
        text: String,
        members: &[Member],
    ) {
        let event = ServerEvent::ChatMessage {
            username: sender_name.to_owned(),
            message: text,
            timestamp: self.clock.now(),
            is_system: false,
        };
        fan_out(registry, room_id, members.iter(), &event);
    }

    /// Same audience as chat.
    pub fn relay_file(
        &mut self,
        registry: &ConnectionRegistry,
        room_id: &RoomId,
        sender_name: &str,
        file: SharedFile,
        members: &[Member],
    ) {
        let event = ServerEvent::FileShare {
            username: sender_name.to_owned(),
            file_name: file.file_name,
            file_size: file.file_size,
            file_type: file.file_type,
            file_data: file.file_data,
            timestamp: self.clock.now(),
        };
        fan_out(registry, room_id, members.iter(), &event);
    }

    /// Mute state goes to everyone but the sender.
    pub fn relay_mute_status(
        &self,
        registry: &ConnectionRegistry,
        room_id: &RoomId,
        sender: &ConnectionId,
        audio_enabled: bool,
        members: &[Member],
    ) {
        let event = ServerEvent::MuteStatus {
            user_id: *sender,
            audio_enabled,
        };
        fan_out(
            registry,
            room_id,
            members.iter().filter(|m| m.id != *sender),
            &event,
        );
    }

    fn system_message(&mut self, message: String) -> ServerEvent {
        ServerEvent::ChatMessage {
            username: SYSTEM_USERNAME.to_owned(),
            message,
            timestamp: self.clock.now(),
            is_system: true,
        }
    }
}

fn fan_out<'a>(
    registry: &ConnectionRegistry,
    room_id: &RoomId,
    recipients: impl Iterator<Item = &'a Member>,
    event: &ServerEvent,
) {
    let mut delivered = 0usize;
    let mut failed = 0usize;

    for member in recipients {
        if registry.deliver(&member.id, event.clone()) {
            delivered += 1;
        } else {
            failed += 1;
        }
    }

    if failed > 0 {
        warn!(
            "Broadcast in '{}' missed {} of {} members",
            room_id,
            failed,
            delivered + failed
        );
    } else {
        debug!("Broadcast in '{}' reached {} members", room_id, delivered);
    }
}
