//! Deferred dispatch port.

/// Work deferred to the next paint opportunity.
pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// Schedules work on the host's rendering cadence.
///
/// Implementations must run tasks in submission order and must not merge or
/// drop them while running.
pub trait DispatchScheduler: Send + Sync {
    /// Run `task` at the next paint opportunity.
    ///
    /// This method should not block.
    fn defer(&self, task: DeferredTask);
}

/// A scheduler that runs every task immediately on the caller.
///
/// Suitable for headless hosts and tests that do not care about paint timing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateDispatch;

impl ImmediateDispatch {
    pub const fn new() -> Self {
        Self
    }
}

impl DispatchScheduler for ImmediateDispatch {
    fn defer(&self, task: DeferredTask) {
        task();
    }
}
