mod broadcaster;
mod envelope;
mod event_clock;
mod router;
mod ws_handler;

pub use broadcaster::*;
pub use envelope::*;
pub use event_clock::*;
pub use router::*;
pub use ws_handler::*;
