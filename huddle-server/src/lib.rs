pub mod config;
pub mod error;
pub mod http;
pub mod hub;
pub mod recorder;
pub mod registry;
pub mod room;
pub mod server;
pub mod signaling;
pub mod state;
pub mod tls;

pub use config::*;
pub use error::*;
pub use hub::*;
pub use recorder::*;
pub use registry::*;
pub use room::*;
pub use server::*;
pub use signaling::*;
pub use state::*;
pub use tls::*;
