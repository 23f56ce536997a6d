use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    collection::{Document, PersistedCollection},
    observer::Subscription,
};
use crate::store::{FAVORITES_KEY, Storage};

pub const TRACKS: &str = "tracks";
pub const EVENTS: &str = "events";
pub const MERCH: &str = "merch";

/// Buckets present in every favorites document.
pub const DEFAULT_BUCKETS: [&str; 3] = [TRACKS, EVENTS, MERCH];

/// Stored shape: `{ "<bucket>": [id, ...], ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesDocument(pub BTreeMap<String, Vec<i64>>);

impl Default for FavoritesDocument {
    fn default() -> Self {
        Self(
            DEFAULT_BUCKETS
                .iter()
                .map(|bucket| ((*bucket).to_string(), Vec::new()))
                .collect(),
        )
    }
}

impl FavoritesDocument {
    pub fn bucket(&self, bucket: &str) -> &[i64] {
        self.0.get(bucket).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, bucket: &str, id: i64) -> bool {
        self.bucket(bucket).contains(&id)
    }

    pub fn total_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl Document for FavoritesDocument {
    const KEY: &'static str = FAVORITES_KEY;
    type Change = BTreeMap<String, Vec<i64>>;

    fn change(&self) -> Self::Change {
        self.0.clone()
    }

    fn normalize(&mut self) {
        for bucket in DEFAULT_BUCKETS {
            self.0.entry(bucket.to_string()).or_default();
        }
        for ids in self.0.values_mut() {
            let mut seen = Vec::with_capacity(ids.len());
            ids.retain(|id| {
                if seen.contains(id) {
                    false
                } else {
                    seen.push(*id);
                    true
                }
            });
        }
    }
}

/// Favorite IDs grouped by bucket, backed by durable storage.
pub struct FavoritesManager<S: Storage> {
    collection: PersistedCollection<FavoritesDocument, S>,
}

impl<S: Storage> FavoritesManager<S> {
    pub async fn load(storage: S) -> Self {
        Self {
            collection: PersistedCollection::load(storage).await,
        }
    }

    pub fn is_favorite(&self, bucket: &str, id: i64) -> bool {
        self.collection.state().contains(bucket, id)
    }

    /// Flips membership of `id` in `bucket` and returns the new membership.
    pub async fn toggle(&mut self, bucket: &str, id: i64) -> bool {
        self.collection
            .mutate(|favorites| {
                let ids = favorites.0.entry(bucket.to_string()).or_default();
                match ids.iter().position(|existing| *existing == id) {
                    Some(index) => {
                        ids.remove(index);
                    }
                    None => ids.push(id),
                }
                true
            })
            .await;

        self.is_favorite(bucket, id)
    }

    /// IDs in `bucket`, in the order they were added. Unknown buckets are empty.
    pub fn favorites(&self, bucket: &str) -> &[i64] {
        self.collection.state().bucket(bucket)
    }

    pub fn all(&self) -> &BTreeMap<String, Vec<i64>> {
        &self.collection.state().0
    }

    /// Copy of the bucket map, narrowed to `bucket` when one is given.
    pub fn selection(&self, bucket: Option<&str>) -> BTreeMap<String, Vec<i64>> {
        self.all()
            .iter()
            .filter(|(name, _)| bucket.is_none_or(|wanted| wanted == name.as_str()))
            .map(|(name, ids)| (name.clone(), ids.clone()))
            .collect()
    }

    pub fn buckets(&self) -> impl Iterator<Item = &str> {
        self.all().keys().map(String::as_str)
    }

    pub fn count(&self, bucket: &str) -> usize {
        self.favorites(bucket).len()
    }

    pub fn total_count(&self) -> usize {
        self.collection.state().total_count()
    }

    /// Empties every bucket, leaving only the default ones.
    pub async fn clear_all(&mut self) {
        self.collection
            .mutate(|favorites| {
                *favorites = FavoritesDocument::default();
                true
            })
            .await;
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&BTreeMap<String, Vec<i64>>) + Send + Sync + 'static,
    {
        self.collection.subscribe(listener)
    }

    pub fn subscriber_count(&self) -> usize {
        self.collection.subscriber_count()
    }

    pub async fn reload(&mut self) {
        self.collection.reload().await;
    }

    pub fn storage(&self) -> &S {
        self.collection.storage()
    }
}
