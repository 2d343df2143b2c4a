use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;
use moodscape_events::location::{is_searchable, ReverseResult, SearchResult};
use moodscape_events::Location;

use crate::cache::LookupCache;

const SEARCH_LIMIT: &str = "5";

/// Forward and reverse lookups against a Nominatim instance.
pub struct Geocoder {
    client: reqwest::Client,
    base: String,
    cache: Arc<LookupCache>,
}

impl Geocoder {
    pub fn new(base: String, cache: Arc<LookupCache>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build http client")?;

        Ok(Geocoder {
            client,
            base,
            cache,
        })
    }

    pub async fn search(&self, query: &str) -> Result<Arc<Vec<Location>>> {
        if !is_searchable(query) {
            return Ok(Arc::new(Vec::new()));
        }

        let key = format!("search:{}", query.trim().to_lowercase());
        if let Some(hit) = self.cache.get(&key).await {
            debug!("Cache hit for {key}");
            return Ok(hit);
        }

        let results: Vec<SearchResult> = self
            .client
            .get(format!("{}/search", self.base))
            .query(&[("q", query.trim()), ("format", "json"), ("limit", SEARCH_LIMIT)])
            .send()
            .await
            .context("geocoder search request failed")?
            .error_for_status()?
            .json()
            .await
            .context("geocoder search response is malformed")?;

        let locations = results.into_iter().map(Location::from).collect();
        Ok(self.cache.insert(key, locations).await)
    }

    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Location> {
        let key = format!("reverse:{latitude:.5},{longitude:.5}");
        if let Some(hit) = self.cache.get(&key).await {
            if let Some(location) = hit.first() {
                return Ok(location.clone());
            }
        }

        let result: ReverseResult = self
            .client
            .get(format!("{}/reverse", self.base))
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
            .context("geocoder reverse request failed")?
            .error_for_status()?
            .json()
            .await
            .context("geocoder reverse response is malformed")?;

        let location = result.into_location(latitude, longitude);
        self.cache.insert(key, vec![location.clone()]).await;
        Ok(location)
    }
}
