use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use moodscape_events::Location;
use tokio::sync::RwLock;
use tokio::task;
use tokio::time::{sleep, Duration};

pub struct Config {
    pub enabled: bool,
    pub ttl: Duration,
}

/// Geocoder results keyed by the normalized lookup, each evicted after `ttl`.
pub struct LookupCache {
    enabled: bool,
    inner: RwLock<HashMap<String, Arc<Vec<Location>>>>,
    ttl: Duration,
}

impl LookupCache {
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            enabled: config.enabled,
            ttl: config.ttl,
            inner: Default::default(),
        })
    }

    pub async fn insert(
        self: &Arc<Self>,
        key: String,
        locations: Vec<Location>,
    ) -> Arc<Vec<Location>> {
        let locations = Arc::new(locations);
        if !self.enabled {
            return locations;
        }

        self.inner
            .write()
            .await
            .insert(key.clone(), Arc::clone(&locations));

        let cache = Arc::clone(self);
        task::spawn(async move {
            sleep(cache.ttl).await;
            cache.inner.write().await.remove(&key);
            debug!("Evicted cached lookup {key}");
        });

        locations
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Vec<Location>>> {
        if !self.enabled {
            return None;
        }

        self.inner.read().await.get(key).map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> Location {
        Location {
            city: "Paris".into(),
            state: "Ile-de-France".into(),
            country: "France".into(),
            latitude: Some(48.85),
            longitude: Some(2.35),
        }
    }

    #[tokio::test]
    async fn disabled_cache_stores_nothing() {
        let cache = LookupCache::new(Config {
            enabled: false,
            ttl: Duration::from_secs(60),
        });

        let stored = cache.insert("search:paris".into(), vec![paris()]).await;
        assert_eq!(stored.len(), 1);
        assert!(cache.get("search:paris").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let cache = LookupCache::new(Config {
            enabled: true,
            ttl: Duration::from_secs(60),
        });

        cache.insert("search:paris".into(), vec![paris()]).await;
        assert_eq!(cache.get("search:paris").await.unwrap()[0].city, "Paris");

        sleep(Duration::from_secs(61)).await;
        assert!(cache.get("search:paris").await.is_none());
    }
}
