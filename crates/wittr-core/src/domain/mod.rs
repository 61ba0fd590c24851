//! Domain types for the live update stream.

mod batch;
mod connectivity;
mod cursor;

pub use batch::{EventBatch, EventRecord};
pub use connectivity::ConnectivityState;
pub use cursor::Cursor;
