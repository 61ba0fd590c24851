//! Error types for the live update client.
//!
//! Connection loss is deliberately absent: a closed transport is a normal
//! state transition handled by the retry loop, never an error value.

use thiserror::Error;

use crate::settings::SettingsError;

/// A received frame could not be turned into an event batch.
///
/// The frame is dropped; the connection it arrived on stays open.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not well-formed JSON.
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload is valid JSON but not an array of records.
    #[error("Frame is not a batch of records (found {found})")]
    NotABatch {
        /// JSON kind that was found instead of an array.
        found: &'static str,
    },
}

/// The host address could not be turned into an updates endpoint.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The host address does not parse as a URL.
    #[error("Invalid host address '{address}': {source}")]
    Invalid {
        address: String,
        #[source]
        source: url::ParseError,
    },

    /// The host scheme has no streaming-socket equivalent.
    #[error("Unsupported scheme '{0}' (expected http, https, ws or wss)")]
    UnsupportedScheme(String),

    /// The updates path would leave the host's origin or carry its own query.
    #[error("Updates path '{path}' does not stay on host '{host}'")]
    ForeignUpdatesPath { path: String, host: String },
}

/// Construction-time errors surfaced to whoever wires up the client.
///
/// Once started, the client never reports errors to its caller.
#[derive(Debug, Error)]
pub enum LiveUpdateError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Address(#[from] AddressError),
}
