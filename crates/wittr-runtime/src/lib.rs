//! Runtime adapters for the Wittr live update client.
//!
//! - [`WsTransportFactory`] implements the core transport port over
//!   `tokio-tungstenite`
//! - [`PaintCadenceScheduler`] implements deferred dispatch on a fixed
//!   frame cadence

#![deny(unsafe_code)]

mod error;
pub mod scheduler;
pub mod transport;

pub use error::TransportError;
pub use scheduler::PaintCadenceScheduler;
pub use transport::{WsTransport, WsTransportFactory};
