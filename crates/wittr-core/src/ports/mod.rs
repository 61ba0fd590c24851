//! Port definitions (trait abstractions) for the client's collaborators.
//!
//! The live update service reaches the page, the network and the host's
//! rendering cadence only through these traits. They contain no
//! implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No socket or runtime types in any signature
//! - Views are synchronous; only the transport suspends
//! - Every port is `Send + Sync` so the client can run on a spawned task

pub mod address;
pub mod dispatch;
pub mod posts_view;
pub mod toast_view;
pub mod transport;

use std::sync::Arc;

pub use address::AddressBuilder;
pub use dispatch::{DeferredTask, DispatchScheduler, ImmediateDispatch};
pub use posts_view::PostsView;
pub use toast_view::{ToastHandle, ToastView};
pub use transport::{Transport, TransportEvent, TransportFactory};

/// Container for all collaborators of a live update client.
///
/// This struct provides a consistent way to wire adapters into the client
/// without coupling it to concrete implementations.
///
/// # Example
///
/// ```ignore
/// let ports = LiveUpdatePorts::new(
///     posts,
///     toasts,
///     Arc::new(HostAddressBuilder::new("http://localhost:8888", &settings)?),
///     Arc::new(WsTransportFactory::new()),
///     Arc::new(PaintCadenceScheduler::spawn(settings.effective_paint_interval())),
/// );
/// let client = LiveUpdateClient::new(ports, &settings)?;
/// ```
#[derive(Clone)]
pub struct LiveUpdatePorts {
    /// Consumer of decoded batches and source of the resumption cursor.
    pub posts: Arc<dyn PostsView>,
    /// Shows the connectivity notice.
    pub toasts: Arc<dyn ToastView>,
    /// Builds the target address for each attempt.
    pub addresses: Arc<dyn AddressBuilder>,
    /// Opens one transport per attempt.
    pub transports: Arc<dyn TransportFactory>,
    /// Defers batch delivery to the next paint opportunity.
    pub scheduler: Arc<dyn DispatchScheduler>,
}

impl LiveUpdatePorts {
    pub fn new(
        posts: Arc<dyn PostsView>,
        toasts: Arc<dyn ToastView>,
        addresses: Arc<dyn AddressBuilder>,
        transports: Arc<dyn TransportFactory>,
        scheduler: Arc<dyn DispatchScheduler>,
    ) -> Self {
        Self {
            posts,
            toasts,
            addresses,
            transports,
            scheduler,
        }
    }
}
