//! Namespaced, time-limited JSON cache on top of a [`KeyValueStore`].
//!
//! Every entry is stored as `{"value": ..., "timestamp": <millis>}` under
//! `prefix + key`. An entry is fresh while `now - timestamp <= duration`.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::app::{ContentError, Result};
use crate::clock::Clock;
use crate::store::KeyValueStore;

/// Cache key of a resource: the endpoint without its `.json` extension.
pub fn cache_key(endpoint: &str) -> String {
    endpoint.trim_start_matches('/').replacen(".json", "", 1)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    pub timestamp: i64,
}

/// Outcome of inspecting a key without evicting it.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Fresh(T),
    Stale(T),
    Missing,
}

impl<T> Lookup<T> {
    /// The cached value regardless of age.
    pub fn any(self) -> Option<T> {
        match self {
            Lookup::Fresh(value) | Lookup::Stale(value) => Some(value),
            Lookup::Missing => None,
        }
    }
}

/// One row of [`CacheStore::status`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheEntryStatus {
    pub key: String,
    /// `None` when the stored entry cannot be decoded.
    pub age_minutes: Option<i64>,
    pub size_bytes: usize,
    pub expired: bool,
}

pub struct CacheStore {
    backend: Arc<dyn KeyValueStore + Send + Sync>,
    prefix: String,
    duration: Duration,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    pub fn new(
        backend: Arc<dyn KeyValueStore + Send + Sync>,
        prefix: impl Into<String>,
        duration: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
            duration,
            clock,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn is_expired(&self, timestamp: i64) -> bool {
        let age = self.clock.now_millis().saturating_sub(timestamp);
        age > i64::try_from(self.duration.as_millis()).unwrap_or(i64::MAX)
    }

    /// Fresh value for `key`. Expired or undecodable entries are evicted.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.lookup(key) {
            Lookup::Fresh(value) => Some(value),
            Lookup::Stale(_) => {
                tracing::debug!("Evicting expired cache entry {}", self.full_key(key));
                self.remove(key);
                None
            }
            Lookup::Missing => None,
        }
    }

    /// Inspect `key` without evicting expired entries.
    ///
    /// Entries that fail to decode are evicted and reported as missing.
    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Lookup<T> {
        let full_key = self.full_key(key);

        let raw = match self.backend.get_item(&full_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Lookup::Missing,
            Err(e) => {
                tracing::error!("Cache read error for {}: {}", full_key, e);
                return Lookup::Missing;
            }
        };

        match serde_json::from_str::<CacheEntry<T>>(&raw) {
            Ok(entry) if self.is_expired(entry.timestamp) => Lookup::Stale(entry.value),
            Ok(entry) => Lookup::Fresh(entry.value),
            Err(e) => {
                tracing::warn!("Discarding unreadable cache entry {}: {}", full_key, e);
                self.remove(key);
                Lookup::Missing
            }
        }
    }

    /// Store `value` under `key`, stamped with the current time.
    ///
    /// Write failures are logged, not returned.
    pub fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let full_key = self.full_key(key);
        let entry = CacheEntry {
            value,
            timestamp: self.clock.now_millis(),
        };

        let result = serde_json::to_string(&entry)
            .map_err(ContentError::from)
            .and_then(|raw| self.backend.set_item(&full_key, &raw));

        match result {
            Ok(()) => tracing::debug!("Cached {}", full_key),
            Err(e) => tracing::error!("Cache write error for {}: {}", full_key, e),
        }
    }

    /// Remove one key, or every key under this store's prefix.
    pub fn clear(&self, key: Option<&str>) -> Result<()> {
        match key {
            Some(key) => self.backend.remove_item(&self.full_key(key))?,
            None => {
                for full_key in self.own_keys()? {
                    self.backend.remove_item(&full_key)?;
                }
            }
        }
        tracing::info!("Cache cleared");
        Ok(())
    }

    pub fn status(&self) -> Result<Vec<CacheEntryStatus>> {
        let now = self.clock.now_millis();
        let mut rows = Vec::new();

        for full_key in self.own_keys()? {
            let Some(raw) = self.backend.get_item(&full_key)? else {
                continue;
            };

            let row = match serde_json::from_str::<CacheEntry<serde_json::Value>>(&raw) {
                Ok(entry) => CacheEntryStatus {
                    key: full_key,
                    age_minutes: Some(now.saturating_sub(entry.timestamp) / 60_000),
                    size_bytes: raw.len(),
                    expired: self.is_expired(entry.timestamp),
                },
                Err(_) => CacheEntryStatus {
                    key: full_key,
                    age_minutes: None,
                    size_bytes: raw.len(),
                    expired: true,
                },
            };
            rows.push(row);
        }

        Ok(rows)
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove_item(&self.full_key(key)) {
            tracing::error!("Cache evict error for {}: {}", self.full_key(key), e);
        }
    }

    fn own_keys(&self) -> Result<Vec<String>> {
        Ok(self
            .backend
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(&self.prefix))
            .collect())
    }
}
