//! Composition root for the CLI.
//!
//! This is the only place where concrete adapters are wired into the
//! live update client. Handlers receive a running [`LiveUpdateHandle`].

use std::sync::Arc;

use wittr_core::{
    HostAddressBuilder, LiveUpdateClient, LiveUpdateError, LiveUpdateHandle, LiveUpdatePorts,
    LiveUpdateSettings, PostsView, ToastView,
};
use wittr_runtime::{PaintCadenceScheduler, WsTransportFactory};

/// Wire the WebSocket transport and paint scheduler behind the given views.
///
/// Must be called within a tokio runtime: the paint scheduler spawns its
/// loop immediately.
pub fn build_client(
    host: &str,
    settings: &LiveUpdateSettings,
    posts: Arc<dyn PostsView>,
    toasts: Arc<dyn ToastView>,
) -> Result<LiveUpdateClient, LiveUpdateError> {
    // Resolve the address first so a bad --host fails before anything is spawned
    let addresses = HostAddressBuilder::new(host, settings)?;
    tracing::debug!(endpoint = %addresses.endpoint(), "Resolved updates endpoint");

    let ports = LiveUpdatePorts::new(
        posts,
        toasts,
        Arc::new(addresses),
        Arc::new(WsTransportFactory::new()),
        Arc::new(PaintCadenceScheduler::spawn(
            settings.effective_paint_interval(),
        )),
    );

    LiveUpdateClient::new(ports, settings)
}

/// Build the client and open its first connection.
pub fn start_client(
    host: &str,
    settings: &LiveUpdateSettings,
    posts: Arc<dyn PostsView>,
    toasts: Arc<dyn ToastView>,
) -> Result<LiveUpdateHandle, LiveUpdateError> {
    Ok(build_client(host, settings, posts, toasts)?.start())
}
