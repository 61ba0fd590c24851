//! Command handlers.

pub mod watch;
