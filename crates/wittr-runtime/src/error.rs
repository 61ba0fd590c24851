//! Transport error types.
//!
//! These never reach the live update client: the transport logs them and
//! reports the connection as closed.

use thiserror::Error;
use tokio_tungstenite::tungstenite;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The WebSocket handshake failed (refused, DNS, HTTP status, TLS).
    #[error("WebSocket handshake with {address} failed: {source}")]
    Handshake {
        address: String,
        #[source]
        source: tungstenite::Error,
    },

    /// The established stream failed while reading.
    #[error("WebSocket stream error: {0}")]
    Stream(#[from] tungstenite::Error),

    /// A binary frame did not carry UTF-8 text.
    #[error("Binary frame is not valid UTF-8 ({len} bytes)")]
    NonTextFrame { len: usize },
}
