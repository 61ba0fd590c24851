//! Connectivity state as shown to the user.

use serde::{Deserialize, Serialize};

/// Whether the live connection is currently up.
///
/// There is no separate "reconnecting" state: a client waiting to retry is
/// `Disconnected`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    Connected,
    #[default]
    Disconnected,
}

impl ConnectivityState {
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}
