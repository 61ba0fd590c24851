//! Transport port.
//!
//! A transport is one persistent, message-oriented session. The client opens
//! a fresh one for every attempt and never reuses a closed transport.

use async_trait::async_trait;

/// Events observed on a transport, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The session is established.
    Opened,
    /// A text payload arrived.
    Frame(String),
    /// The session ended, for any reason.
    ///
    /// A failed handshake yields `Closed` without a preceding `Opened`.
    Closed,
}

/// Opens transports.
pub trait TransportFactory: Send + Sync {
    /// Create a transport for `address`.
    ///
    /// Opening never fails here: connection errors surface later as
    /// [`TransportEvent::Closed`].
    fn open(&self, address: &str) -> Box<dyn Transport>;
}

/// A single session.
#[async_trait]
pub trait Transport: Send {
    /// Wait for the next event.
    ///
    /// `Closed` is the last event a transport yields; later calls return `None`.
    async fn next_event(&mut self) -> Option<TransportEvent>;

    /// Close the session without yielding further events.
    async fn close(&mut self);
}
