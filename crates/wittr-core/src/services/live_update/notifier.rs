//! Connectivity notice management.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ConnectivityState;
use crate::ports::{ToastHandle, ToastView};

/// Keeps at most one "disconnected" notice on screen.
///
/// `Connected → (closure) → Disconnected(notice shown) → (opened) → Connected`.
/// Both transitions are idempotent.
pub struct ConnectivityNotifier {
    toasts: Arc<dyn ToastView>,
    outstanding: Option<Box<dyn ToastHandle>>,
    state: ConnectivityState,
}

impl ConnectivityNotifier {
    pub fn new(toasts: Arc<dyn ToastView>) -> Self {
        Self {
            toasts,
            outstanding: None,
            state: ConnectivityState::Disconnected,
        }
    }

    /// Show `message` unless a notice is already outstanding.
    pub fn raise(&mut self, message: &str) {
        self.state = ConnectivityState::Disconnected;
        if self.outstanding.is_some() {
            debug!("Connectivity notice already shown");
            return;
        }
        self.outstanding = Some(self.toasts.show(message));
    }

    /// Hide the outstanding notice, if any.
    pub fn clear(&mut self) {
        self.state = ConnectivityState::Connected;
        if let Some(notice) = self.outstanding.take() {
            notice.hide();
        }
    }

    pub const fn state(&self) -> ConnectivityState {
        self.state
    }

    pub const fn has_notice(&self) -> bool {
        self.outstanding.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Recording toast view for testing.
    #[derive(Default)]
    struct RecordingToasts {
        calls: Arc<Mutex<Vec<String>>>,
    }

    struct RecordingHandle {
        message: String,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl ToastView for RecordingToasts {
        fn show(&self, message: &str) -> Box<dyn ToastHandle> {
            self.calls.lock().unwrap().push(format!("show:{message}"));
            Box::new(RecordingHandle {
                message: message.to_string(),
                calls: Arc::clone(&self.calls),
            })
        }
    }

    impl ToastHandle for RecordingHandle {
        fn hide(self: Box<Self>) {
            self.calls.lock().unwrap().push(format!("hide:{}", self.message));
        }
    }

    fn notifier() -> (ConnectivityNotifier, Arc<Mutex<Vec<String>>>) {
        let toasts = RecordingToasts::default();
        let calls = Arc::clone(&toasts.calls);
        (ConnectivityNotifier::new(Arc::new(toasts)), calls)
    }

    #[test]
    fn test_repeated_raise_shows_once() {
        let (mut notifier, calls) = notifier();

        notifier.raise("down");
        notifier.raise("down");
        notifier.raise("down");

        assert!(notifier.has_notice());
        assert_eq!(*calls.lock().unwrap(), vec!["show:down"]);
        assert_eq!(notifier.state(), ConnectivityState::Disconnected);
    }

    #[test]
    fn test_repeated_clear_hides_once() {
        let (mut notifier, calls) = notifier();

        notifier.raise("down");
        notifier.clear();
        notifier.clear();

        assert!(!notifier.has_notice());
        assert_eq!(*calls.lock().unwrap(), vec!["show:down", "hide:down"]);
        assert_eq!(notifier.state(), ConnectivityState::Connected);
    }

    #[test]
    fn test_clear_without_notice_is_noop() {
        let (mut notifier, calls) = notifier();

        notifier.clear();

        assert!(calls.lock().unwrap().is_empty());
        assert!(notifier.state().is_connected());
    }

    #[test]
    fn test_notice_shown_again_after_recovery() {
        let (mut notifier, calls) = notifier();

        notifier.raise("down");
        notifier.clear();
        notifier.raise("down");

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["show:down", "hide:down", "show:down"]
        );
    }
}
