//! Core of the Wittr live update client.
//!
//! The crate keeps a long-lived, order-sensitive event stream open between a
//! client and the `/updates` endpoint of a Wittr server. It reconnects after
//! any closure, resumes from the newest post the consumer already holds, and
//! keeps a single "disconnected" notice on screen while the stream is down.
//!
//! Everything outside that loop is reached through ports:
//!
//! - [`PostsView`] receives decoded batches and reports the newest post date
//! - [`ToastView`] shows and hides the connectivity notice
//! - [`TransportFactory`] opens one [`Transport`] per connection attempt
//! - [`AddressBuilder`] turns a [`Cursor`] into a target address
//! - [`DispatchScheduler`] defers batch delivery to the host's paint cadence
//!
//! Concrete transports and schedulers live in `wittr-runtime`.

#![deny(unused_crate_dependencies)]

pub mod address;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use address::HostAddressBuilder;
pub use domain::{ConnectivityState, Cursor, EventBatch, EventRecord};
pub use error::{AddressError, DecodeError, LiveUpdateError};
pub use ports::{
    AddressBuilder, DeferredTask, DispatchScheduler, ImmediateDispatch, LiveUpdatePorts,
    PostsView, ToastHandle, ToastView, Transport, TransportEvent, TransportFactory,
};
pub use services::live_update::{
    ConnectivityNotifier, FrameDispatcher, LiveUpdateClient, LiveUpdateHandle,
    ResumptionStrategy, decode_frame,
};
pub use settings::{
    DEFAULT_DISCONNECTED_MESSAGE, DEFAULT_PAINT_INTERVAL_MS, DEFAULT_RETRY_DELAY_MS,
    DEFAULT_UPDATES_PATH, LiveUpdateSettings, SettingsError, validate_settings,
};
