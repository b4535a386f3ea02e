pub mod test_connection;

pub use hub_helpers::*;
pub use mock_recorder::*;
pub use test_connection::*;
