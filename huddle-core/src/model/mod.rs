mod connection;
mod member;
mod negotiation;
mod room;
mod signaling;

pub use connection::ConnectionId;
pub use member::Member;
pub use negotiation::is_polite;
pub use room::RoomId;
pub use signaling::{ClientEvent, IceServerConfig, ServerEvent};
