//! Terminal client for Wittr live updates.
//!
//! `wittr watch` connects to a Wittr server, prints every post it receives
//! and reports connectivity notices on stderr.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dependencies used by the binary only
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod views;

// Re-export primary types for convenient access
pub use bootstrap::{build_client, start_client};
pub use commands::{Commands, WatchArgs};
pub use error::CliError;
pub use parser::Cli;
pub use views::{TerminalPostsView, TerminalToastView};
