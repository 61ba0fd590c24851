//! Services built on top of the ports.

pub mod live_update;
