use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tokio::time::sleep;

use super::CatalogError;
use crate::{
    config,
    types::{Event, MerchItem, Track},
};

const MAX_ATTEMPTS: u32 = 3;

#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Plain(Vec<T>),
    Paginated { results: Vec<T> },
}

impl<T> Listing<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Plain(items) | Self::Paginated { results: items } => items,
        }
    }
}

/// Client for the read-only listing endpoints of the site API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    http: Client,
    retry_delay: Duration,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
            retry_delay: Duration::from_secs(10),
        }
    }

    /// Client for the configured `WHIZZYVERSE_API_URL`.
    pub fn from_env() -> Self {
        Self::new(config::api_url())
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn tracks(&self) -> Result<Vec<Track>, CatalogError> {
        self.list("tracks").await
    }

    pub async fn events(&self) -> Result<Vec<Event>, CatalogError> {
        self.list("events").await
    }

    pub async fn merch(&self) -> Result<Vec<MerchItem>, CatalogError> {
        self.list("merch").await
    }

    async fn list<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, CatalogError> {
        let url = format!("{base}/{resource}/", base = self.base_url);

        for attempt in 1..=MAX_ATTEMPTS {
            let response = self.http.get(&url).send().await?;

            let response = match response.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) if err.status() == Some(StatusCode::BAD_GATEWAY) => {
                    tracing::warn!(%url, attempt, "bad gateway");
                    if attempt < MAX_ATTEMPTS {
                        sleep(self.retry_delay).await;
                    }
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            let listing = response.json::<Listing<T>>().await?;
            return Ok(listing.into_items());
        }

        Err(CatalogError::RetriesExhausted {
            url,
            attempts: MAX_ATTEMPTS,
        })
    }
}
