//! Connection manager: opens, listens and reconnects.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{ConnectivityNotifier, FrameDispatcher, ResumptionStrategy};
use crate::domain::ConnectivityState;
use crate::error::LiveUpdateError;
use crate::ports::{AddressBuilder, LiveUpdatePorts, Transport, TransportEvent, TransportFactory};
use crate::settings::{LiveUpdateSettings, validate_settings};

/// How a single connection ended.
enum SessionEnd {
    /// The transport closed; schedule a retry.
    Closed,
    /// The client was asked to stop.
    Stopped,
}

/// Reconnecting live update client.
///
/// Construct with [`LiveUpdateClient::new`], then call [`start`](Self::start)
/// from within a tokio runtime. From then on the client drives itself: every
/// attempt looks up a fresh cursor, builds a fresh address and opens a fresh
/// transport. Closures are retried after a fixed delay, forever.
pub struct LiveUpdateClient {
    addresses: Arc<dyn AddressBuilder>,
    transports: Arc<dyn TransportFactory>,
    resumption: ResumptionStrategy,
    dispatcher: FrameDispatcher,
    notifier: ConnectivityNotifier,
    retry_delay: Duration,
    disconnected_message: String,
    cancel_token: CancellationToken,
}

impl LiveUpdateClient {
    /// Create a client from its collaborators.
    ///
    /// Fails only if `settings` do not validate.
    pub fn new(
        ports: LiveUpdatePorts,
        settings: &LiveUpdateSettings,
    ) -> Result<Self, LiveUpdateError> {
        validate_settings(settings)?;

        let cancel_token = CancellationToken::new();
        Ok(Self {
            addresses: ports.addresses,
            transports: ports.transports,
            resumption: ResumptionStrategy::new(Arc::clone(&ports.posts)),
            dispatcher: FrameDispatcher::new(ports.posts, ports.scheduler)
                .with_cancel_token(cancel_token.clone()),
            notifier: ConnectivityNotifier::new(ports.toasts),
            retry_delay: settings.effective_retry_delay(),
            disconnected_message: settings.effective_disconnected_message().to_string(),
            cancel_token,
        })
    }

    /// Open the first connection and keep reconnecting until stopped.
    ///
    /// Must be called within a tokio runtime.
    pub fn start(self) -> LiveUpdateHandle {
        let cancel_token = self.cancel_token.clone();
        let (state_tx, state_rx) = watch::channel(self.notifier.state());
        let task = tokio::spawn(self.run(cancel_token.clone(), state_tx));

        LiveUpdateHandle {
            cancel_token,
            state: state_rx,
            task: Some(task),
        }
    }

    async fn run(
        mut self,
        cancel_token: CancellationToken,
        state_tx: watch::Sender<ConnectivityState>,
    ) {
        let mut attempt: u64 = 0;

        loop {
            attempt += 1;
            let cursor = self.resumption.current_cursor();
            let address = self.addresses.address_for(cursor);
            debug!(attempt, %address, %cursor, "Opening live update connection");

            let mut connection = self.transports.open(&address);
            match self
                .listen(connection.as_mut(), &cancel_token, &state_tx)
                .await
            {
                SessionEnd::Stopped => {
                    connection.close().await;
                    debug!(attempt, "Live update client stopped");
                    return;
                }
                SessionEnd::Closed => drop(connection),
            }

            self.notifier.raise(&self.disconnected_message);
            state_tx.send_replace(self.notifier.state());
            info!(
                attempt,
                retry_delay = ?self.retry_delay,
                "Live update connection closed, retrying"
            );

            tokio::select! {
                biased;
                () = cancel_token.cancelled() => {
                    debug!(attempt, "Live update client stopped while waiting to retry");
                    return;
                }
                () = sleep(self.retry_delay) => {}
            }
        }
    }

    /// Pump one connection until it closes or the client is stopped.
    async fn listen(
        &mut self,
        connection: &mut dyn Transport,
        cancel_token: &CancellationToken,
        state_tx: &watch::Sender<ConnectivityState>,
    ) -> SessionEnd {
        loop {
            let event = tokio::select! {
                biased;
                () = cancel_token.cancelled() => return SessionEnd::Stopped,
                event = connection.next_event() => event,
            };

            match event {
                Some(TransportEvent::Opened) => {
                    self.notifier.clear();
                    state_tx.send_replace(self.notifier.state());
                    info!("Live update connection opened");
                }
                Some(TransportEvent::Frame(payload)) => match self.dispatcher.on_frame(&payload) {
                    Ok(records) => debug!(records, "Live update batch scheduled"),
                    Err(e) => warn!(error = %e, "Dropping undecodable live update frame"),
                },
                Some(TransportEvent::Closed) | None => return SessionEnd::Closed,
            }
        }
    }
}

/// Control handle of a started [`LiveUpdateClient`].
///
/// Dropping the handle cancels the client; [`stop`](Self::stop) also waits
/// for the active connection to close.
pub struct LiveUpdateHandle {
    cancel_token: CancellationToken,
    state: watch::Receiver<ConnectivityState>,
    task: Option<JoinHandle<()>>,
}

impl LiveUpdateHandle {
    /// Current connectivity as last reported by the client.
    pub fn state(&self) -> ConnectivityState {
        *self.state.borrow()
    }

    /// Receiver that observes every connectivity change.
    pub fn subscribe(&self) -> watch::Receiver<ConnectivityState> {
        self.state.clone()
    }

    /// Whether the client task is still running.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the client.
    ///
    /// Cancels a pending retry, closes the active connection without raising
    /// a notice or reconnecting, and waits for the client task to finish.
    /// Batches still waiting for a paint opportunity are discarded: no
    /// `add_posts` call happens once this returns.
    pub async fn stop(mut self) {
        self.cancel_token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Live update task ended abnormally");
            }
        }
    }
}

impl Drop for LiveUpdateHandle {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}
