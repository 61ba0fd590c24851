//! Posts view port.

use chrono::{DateTime, Utc};

use crate::domain::EventBatch;

/// The consumer of live updates.
///
/// The view is the source of truth for what has been rendered: the client
/// never tracks delivered posts itself, it asks the view on every attempt.
#[cfg_attr(test, mockall::automock)]
pub trait PostsView: Send + Sync {
    /// Date of the newest post the view already holds, if any.
    fn latest_post_date(&self) -> Option<DateTime<Utc>>;

    /// Add one decoded batch. Called once per frame, in wire order.
    fn add_posts(&self, posts: EventBatch);
}
