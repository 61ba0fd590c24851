//! Paint-aligned dispatch scheduler.
//!
//! Emulates a host's rendering cadence: deferred tasks wait for the next
//! frame boundary and then run back to back, in submission order.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace, warn};
use wittr_core::{DeferredTask, DispatchScheduler};

/// Runs deferred tasks on a fixed frame cadence.
///
/// The paint loop runs on its own task and ends when the scheduler is dropped.
/// Tasks still queued at that point are discarded.
#[derive(Debug, Clone)]
pub struct PaintCadenceScheduler {
    tx: mpsc::UnboundedSender<DeferredTask>,
}

impl PaintCadenceScheduler {
    /// Spawn the paint loop. Must be called within a tokio runtime.
    pub fn spawn(paint_interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(paint_loop(rx, paint_interval));
        Self { tx }
    }
}

impl DispatchScheduler for PaintCadenceScheduler {
    fn defer(&self, task: DeferredTask) {
        if self.tx.send(task).is_err() {
            warn!("Paint loop has stopped, dropping deferred task");
        }
    }
}

async fn paint_loop(mut rx: mpsc::UnboundedReceiver<DeferredTask>, paint_interval: Duration) {
    let origin = Instant::now();

    while let Some(first) = rx.recv().await {
        sleep_until(next_frame(origin, paint_interval, Instant::now())).await;

        first();
        let mut ran = 1_usize;
        while let Ok(task) = rx.try_recv() {
            task();
            ran += 1;
        }
        trace!(ran, "Paint frame");
    }

    debug!("Paint loop finished");
}

/// First frame boundary strictly after `now`, counting from `origin`.
fn next_frame(origin: Instant, period: Duration, now: Instant) -> Instant {
    let period_ns = period.as_nanos().max(1);
    let elapsed_ns = now.saturating_duration_since(origin).as_nanos();
    let frames = elapsed_ns / period_ns + 1;
    let offset = u64::try_from(frames * period_ns).unwrap_or(u64::MAX);
    origin + Duration::from_nanos(offset)
}
