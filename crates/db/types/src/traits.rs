//! Trait definitions for low level database interfaces.

use crate::DbResult;

/// Database interface for small, node-local metadata entries that are addressed by a
/// well-known key, such as progress markers that must survive restarts.
///
/// Operations are NOT VALIDATED at this level; the value is an opaque byte string whose
/// encoding is owned by the caller.
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait MetadataDatabase: Send + Sync + 'static {
    /// Gets the raw value stored under `key`, if any.
    fn get_metadata(&self, key: &[u8]) -> DbResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing whatever was there.
    fn put_metadata(&self, key: &[u8], value: Vec<u8>) -> DbResult<()>;
}
