//! Live update settings and validation.
//!
//! All fields are optional so partial configuration (flags, environment,
//! serialized files) can be layered over the defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fixed delay between a closure and the next connection attempt.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 5000;

/// Path of the updates endpoint on the host.
pub const DEFAULT_UPDATES_PATH: &str = "/updates";

/// Text of the connectivity notice.
pub const DEFAULT_DISCONNECTED_MESSAGE: &str = "Unable to connect. Retrying…";

/// Cadence of the paint-aligned dispatch scheduler (about 60 frames per second).
pub const DEFAULT_PAINT_INTERVAL_MS: u64 = 16;

/// Live update client settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LiveUpdateSettings {
    /// Delay before reconnecting after a closure, in milliseconds.
    pub retry_delay_ms: Option<u64>,

    /// Path of the updates endpoint, joined onto the host address.
    pub updates_path: Option<String>,

    /// Message shown while the connection is down.
    pub disconnected_message: Option<String>,

    /// Append the host address's own query string to the updates address.
    ///
    /// Only useful for test harnesses that configure the server through the
    /// page query.
    pub forward_page_query: Option<bool>,

    /// Interval between paint opportunities for deferred dispatch, in milliseconds.
    pub paint_interval_ms: Option<u64>,
}

impl LiveUpdateSettings {
    /// Create settings with every field set to its default.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            retry_delay_ms: Some(DEFAULT_RETRY_DELAY_MS),
            updates_path: Some(DEFAULT_UPDATES_PATH.to_string()),
            disconnected_message: Some(DEFAULT_DISCONNECTED_MESSAGE.to_string()),
            forward_page_query: Some(false),
            paint_interval_ms: Some(DEFAULT_PAINT_INTERVAL_MS),
        }
    }

    #[must_use]
    pub fn effective_retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS))
    }

    #[must_use]
    pub fn effective_updates_path(&self) -> &str {
        self.updates_path.as_deref().unwrap_or(DEFAULT_UPDATES_PATH)
    }

    #[must_use]
    pub fn effective_disconnected_message(&self) -> &str {
        self.disconnected_message
            .as_deref()
            .unwrap_or(DEFAULT_DISCONNECTED_MESSAGE)
    }

    #[must_use]
    pub fn effective_forward_page_query(&self) -> bool {
        self.forward_page_query.unwrap_or(false)
    }

    #[must_use]
    pub fn effective_paint_interval(&self) -> Duration {
        Duration::from_millis(self.paint_interval_ms.unwrap_or(DEFAULT_PAINT_INTERVAL_MS))
    }

    /// Overlay every field that is set in `other`.
    pub fn merge(&mut self, other: &Self) {
        if other.retry_delay_ms.is_some() {
            self.retry_delay_ms = other.retry_delay_ms;
        }
        if let Some(ref path) = other.updates_path {
            self.updates_path = Some(path.clone());
        }
        if let Some(ref message) = other.disconnected_message {
            self.disconnected_message = Some(message.clone());
        }
        if other.forward_page_query.is_some() {
            self.forward_page_query = other.forward_page_query;
        }
        if other.paint_interval_ms.is_some() {
            self.paint_interval_ms = other.paint_interval_ms;
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Retry delay must be between 100 and 600,000 ms, got {0}")]
    InvalidRetryDelay(u64),

    #[error("Updates path must be a plain absolute path on the host, got '{0}'")]
    InvalidUpdatesPath(String),

    #[error("Disconnected message cannot be empty")]
    EmptyDisconnectedMessage,

    #[error("Paint interval must be between 1 and 1,000 ms, got {0}")]
    InvalidPaintInterval(u64),
}

/// Validate settings values.
pub fn validate_settings(settings: &LiveUpdateSettings) -> Result<(), SettingsError> {
    if let Some(delay) = settings.retry_delay_ms {
        if !(100..=600_000).contains(&delay) {
            return Err(SettingsError::InvalidRetryDelay(delay));
        }
    }

    if let Some(ref path) = settings.updates_path {
        if !is_plain_absolute_path(path) {
            return Err(SettingsError::InvalidUpdatesPath(path.clone()));
        }
    }

    if settings
        .disconnected_message
        .as_ref()
        .is_some_and(|m| m.trim().is_empty())
    {
        return Err(SettingsError::EmptyDisconnectedMessage);
    }

    if let Some(interval) = settings.paint_interval_ms {
        if !(1..=1000).contains(&interval) {
            return Err(SettingsError::InvalidPaintInterval(interval));
        }
    }

    Ok(())
}

/// A path that joins onto the host without changing its authority or query.
///
/// `//` and `\\` prefixes are network-path references and would switch hosts.
pub(crate) fn is_plain_absolute_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains(['\\', '?', '#'])
}
