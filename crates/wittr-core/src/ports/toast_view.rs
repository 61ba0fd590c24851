//! Toast view port.

/// Displays transient user-facing notices.
pub trait ToastView: Send + Sync {
    /// Show a notice and return a handle that hides it.
    fn show(&self, message: &str) -> Box<dyn ToastHandle>;
}

/// A notice currently on screen.
///
/// Hiding consumes the handle, so a notice can only be hidden once.
pub trait ToastHandle: Send {
    fn hide(self: Box<Self>);
}
