//! Address builder port.

use crate::domain::Cursor;

/// Builds the target address of a connection attempt.
///
/// Replaces ambient access to the page location so the client can be driven
/// against any host, including fakes in tests.
pub trait AddressBuilder: Send + Sync {
    /// Address for an attempt resuming at `cursor`.
    fn address_for(&self, cursor: Cursor) -> String;
}
