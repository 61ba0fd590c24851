//! Reconnecting live update client.
//!
//! ## Components
//! - [`LiveUpdateClient`]: connection manager; opens, listens and reconnects
//! - [`ResumptionStrategy`]: cursor lookup for each attempt
//! - [`FrameDispatcher`]: decodes frames and defers delivery to the posts view
//! - [`ConnectivityNotifier`]: single de-duplicated "disconnected" notice
//!
//! ## Lifecycle
//! A started client owns its connection, notice and retry timer on one task.
//! Every closure, graceful or not, raises the notice and schedules a new
//! attempt after the fixed retry delay. [`LiveUpdateHandle::stop`] is the only
//! way out of the loop.

mod client;
mod dispatcher;
mod notifier;
mod resumption;

pub use client::{LiveUpdateClient, LiveUpdateHandle};
pub use dispatcher::{FrameDispatcher, decode_frame};
pub use notifier::ConnectivityNotifier;
pub use resumption::ResumptionStrategy;
