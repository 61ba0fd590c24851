//! Cursor derivation for connection attempts.

use std::sync::Arc;

use crate::domain::Cursor;
use crate::ports::PostsView;

/// Asks the posts view where the next attempt should resume.
///
/// The cursor is recomputed for every attempt and never cached, so posts
/// rendered between the first connection and a later reconnect are
/// accounted for.
#[derive(Clone)]
pub struct ResumptionStrategy {
    posts: Arc<dyn PostsView>,
}

impl ResumptionStrategy {
    pub fn new(posts: Arc<dyn PostsView>) -> Self {
        Self { posts }
    }

    /// Cursor at the newest post the consumer holds right now.
    pub fn current_cursor(&self) -> Cursor {
        Cursor::from_latest(self.posts.latest_post_date())
    }
}
