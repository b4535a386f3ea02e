mod memory_recorder;
mod recorder_handle;
mod session_record;
mod session_recorder;

pub use memory_recorder::*;
pub use recorder_handle::*;
pub use session_record::*;
pub use session_recorder::*;
