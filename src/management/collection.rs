use serde::{Serialize, de::DeserializeOwned};

use super::observer::{Observers, Subscription};
use crate::store::Storage;

/// A JSON document kept under a fixed storage key.
pub trait Document: Serialize + DeserializeOwned + Default + Send + Sync {
    const KEY: &'static str;

    /// What subscribers receive after a save.
    type Change: 'static;

    fn change(&self) -> Self::Change;

    /// Repairs invariants after the document was read back from storage.
    fn normalize(&mut self) {}
}

/// An in-memory document synchronized with durable storage.
///
/// The in-memory value is the source of truth for the session. Reads that fail
/// degrade to the empty document and writes that fail are logged; neither is
/// reported to the caller.
pub struct PersistedCollection<D: Document, S: Storage> {
    storage: S,
    state: D,
    observers: Observers<D::Change>,
}

impl<D: Document, S: Storage> PersistedCollection<D, S> {
    pub async fn load(storage: S) -> Self {
        let state = read_state::<D, S>(&storage).await;
        Self {
            storage,
            state,
            observers: Observers::new(),
        }
    }

    /// Replaces the in-memory state with what is currently stored. Subscribers
    /// are not notified.
    pub async fn reload(&mut self) {
        self.state = read_state::<D, S>(&self.storage).await;
    }

    pub fn state(&self) -> &D {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Writes the document and notifies subscribers.
    ///
    /// Returns whether the write reached storage. Subscribers are notified
    /// either way since the in-memory state is what the session sees.
    pub async fn save(&self) -> bool {
        let persisted = match serde_json::to_string_pretty(&self.state) {
            Ok(json) => match self.storage.write(D::KEY, &json).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!(key = D::KEY, error = %e, "failed to save collection");
                    false
                }
            },
            Err(e) => {
                tracing::error!(key = D::KEY, error = %e, "failed to serialize collection");
                false
            }
        };

        self.observers.notify(&self.state.change());
        persisted
    }

    /// Applies `op` and saves when it reports a change.
    pub async fn mutate<F>(&mut self, op: F) -> bool
    where
        F: FnOnce(&mut D) -> bool,
    {
        let changed = op(&mut self.state);
        if changed {
            self.save().await;
        }
        changed
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&D::Change) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }
}

async fn read_state<D: Document, S: Storage>(storage: &S) -> D {
    let mut state = match storage.read(D::KEY).await {
        Ok(Some(raw)) => match serde_json::from_str::<D>(&raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(key = D::KEY, error = %e, "stored collection is malformed, starting empty");
                D::default()
            }
        },
        Ok(None) => {
            tracing::debug!(key = D::KEY, "no stored collection, starting empty");
            D::default()
        }
        Err(e) => {
            tracing::warn!(key = D::KEY, error = %e, "failed to load collection, starting empty");
            D::default()
        }
    };

    state.normalize();
    state
}
