//! # Durable Local Store
//!
//! Key-value storage that outlives a single run of the application. Each key
//! holds one serialized JSON document; the collection managers in
//! [`crate::management`] are the only writers.
//!
//! Two implementations are provided:
//!
//! - [`FileStorage`] - one `<key>.json` file per key below a root directory,
//!   by default inside the platform's local data directory
//! - [`MemoryStorage`] - an in-process map for tests and for sessions that
//!   must not touch the disk (`--ephemeral`)
//!
//! Storage failures are reported through [`StorageError`]; callers in this
//! crate log them and keep working with their in-memory state.

mod file;
mod memory;

use std::future::Future;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage key of the shopping cart document.
pub const CART_KEY: &str = "whizzyverse_cart";

/// Storage key of the favorites document.
pub const FAVORITES_KEY: &str = "whizzyverse_favorites";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A durable string store addressed by key.
///
/// `read` returns `Ok(None)` when nothing was stored under the key yet.
pub trait Storage: Send + Sync {
    fn read(&self, key: &str)
    -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    fn write(&self, key: &str, value: &str)
    -> impl Future<Output = Result<(), StorageError>> + Send;

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Keys end up as file names, so only a conservative alphabet is accepted.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
