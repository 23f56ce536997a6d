//! # Catalog Module
//!
//! Read-only access to the site's REST API. The local collections only hold
//! IDs and quantities; when a view needs full records (a favorites page showing
//! track titles, say) it fetches the complete listing from the API and keeps
//! the records whose id is a member of the local set.
//!
//! ## Endpoints
//!
//! - `GET {base}/tracks/` - [`Track`] listing
//! - `GET {base}/events/` - [`Event`] listing
//! - `GET {base}/merch/` - [`MerchItem`] listing
//!
//! Listings may come back as a bare JSON array or paginated as
//! `{"results": [...]}`; both are accepted.
//!
//! ## Error Handling
//!
//! `502 Bad Gateway` responses are retried a few times with a fixed delay.
//! Everything else is returned as [`CatalogError`].

mod client;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{
    management::{EVENTS, MERCH, TRACKS},
    types::{Event, MerchItem, Track},
};

pub use client::CatalogClient;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog unavailable after {attempts} attempts: {url}")]
    RetriesExhausted { url: String, attempts: u32 },
}

/// Anything the API identifies by an integer id.
pub trait Record {
    fn id(&self) -> i64;
}

impl Record for Track {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Event {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for MerchItem {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Keeps the records whose id is in `ids`, in catalog order.
pub fn filter_by_ids<T: Record>(records: Vec<T>, ids: &[i64]) -> Vec<T> {
    records
        .into_iter()
        .filter(|record| ids.contains(&record.id()))
        .collect()
}

/// Favorite IDs resolved to full records.
#[derive(Debug, Clone, Default)]
pub struct ResolvedFavorites {
    pub tracks: Vec<Track>,
    pub events: Vec<Event>,
    pub merch: Vec<MerchItem>,
}

impl ResolvedFavorites {
    pub fn len(&self) -> usize {
        self.tracks.len() + self.events.len() + self.merch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fetches the listings for every non-empty default bucket and filters them
/// down to the favorited IDs. Empty buckets cost no request.
pub async fn resolve_favorites(
    client: &CatalogClient,
    favorites: &BTreeMap<String, Vec<i64>>,
) -> Result<ResolvedFavorites, CatalogError> {
    let mut resolved = ResolvedFavorites::default();

    let tracks = bucket_ids(favorites, TRACKS);
    if !tracks.is_empty() {
        resolved.tracks = filter_by_ids(client.tracks().await?, tracks);
    }
    let events = bucket_ids(favorites, EVENTS);
    if !events.is_empty() {
        resolved.events = filter_by_ids(client.events().await?, events);
    }
    let merch = bucket_ids(favorites, MERCH);
    if !merch.is_empty() {
        resolved.merch = filter_by_ids(client.merch().await?, merch);
    }

    Ok(resolved)
}

fn bucket_ids<'a>(favorites: &'a BTreeMap<String, Vec<i64>>, bucket: &str) -> &'a [i64] {
    favorites.get(bucket).map(Vec::as_slice).unwrap_or_default()
}
