//! Frame decoding and deferred delivery.

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::domain::EventBatch;
use crate::error::DecodeError;
use crate::ports::{DispatchScheduler, PostsView};

/// Decode one frame payload into an event batch.
///
/// The payload must be a JSON array; each element is passed through as an
/// opaque record.
pub fn decode_frame(payload: &str) -> Result<EventBatch, DecodeError> {
    match serde_json::from_str::<Value>(payload)? {
        Value::Array(records) => Ok(EventBatch::from(records)),
        other => Err(DecodeError::NotABatch {
            found: json_kind(&other),
        }),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Hands decoded batches to the posts view on the paint cadence.
///
/// Each frame becomes its own `add_posts` call. Batches decoded between two
/// paint opportunities are queued, not merged. Batches still queued when the
/// cancel token fires are discarded at their paint opportunity.
#[derive(Clone)]
pub struct FrameDispatcher {
    posts: Arc<dyn PostsView>,
    scheduler: Arc<dyn DispatchScheduler>,
    cancel_token: CancellationToken,
}

impl FrameDispatcher {
    pub fn new(posts: Arc<dyn PostsView>, scheduler: Arc<dyn DispatchScheduler>) -> Self {
        Self {
            posts,
            scheduler,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Stop delivering once `cancel_token` is cancelled.
    #[must_use]
    pub fn with_cancel_token(mut self, cancel_token: CancellationToken) -> Self {
        self.cancel_token = cancel_token;
        self
    }

    /// Decode `payload` and schedule its delivery.
    ///
    /// Returns the number of records scheduled. A malformed payload is
    /// rejected before anything is scheduled.
    pub fn on_frame(&self, payload: &str) -> Result<usize, DecodeError> {
        let batch = decode_frame(payload)?;
        let records = batch.len();

        let posts = Arc::clone(&self.posts);
        let cancel_token = self.cancel_token.clone();
        self.scheduler.defer(Box::new(move || {
            if cancel_token.is_cancelled() {
                trace!(records, "Discarding batch queued before stop");
                return;
            }
            posts.add_posts(batch);
        }));

        Ok(records)
    }
}
