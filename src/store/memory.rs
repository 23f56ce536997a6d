use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use super::{Storage, StorageError, validate_key};

/// In-process storage. Clones share the same map.
///
/// An [`unavailable`](MemoryStorage::unavailable) store fails every call, which
/// mirrors a host that denies durable storage altogether.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            entries: Arc::default(),
            unavailable: true,
        }
    }

    /// Seeds a raw value, bypassing key validation. Handy for corrupt fixtures.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        self
    }

    fn guard(&self, key: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable(
                "memory storage disabled".to_string(),
            ));
        }
        validate_key(key)
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage poisoned".to_string()))
    }
}

impl Storage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.guard(key)?;
        Ok(self.lock()?.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.guard(key)?;
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.guard(key)?;
        self.lock()?.remove(key);
        Ok(())
    }
}
