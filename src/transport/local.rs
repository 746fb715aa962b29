use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::{ContentError, Result};
use crate::cache::{self, CacheStore};
use crate::transport::{Method, Transport};

/// Reads seed resources from a directory of JSON files and keeps writes in
/// the cache, which acts as the system of record in local mode.
pub struct LocalTransport {
    base_path: PathBuf,
    cache: Arc<CacheStore>,
    save_delay: Duration,
}

impl LocalTransport {
    pub fn new(base_path: impl AsRef<Path>, cache: Arc<CacheStore>, save_delay: Duration) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            cache,
            save_delay,
        }
    }

    pub fn path_for(&self, endpoint: &str) -> PathBuf {
        self.base_path.join(endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for LocalTransport {
    /// The stored record if one exists, whatever its age; the seed file otherwise.
    async fn read(&self, endpoint: &str) -> Result<Value> {
        let key = cache::cache_key(endpoint);
        if let Some(stored) = self.cache.lookup::<Value>(&key).any() {
            tracing::debug!("Read {} from local store", key);
            return Ok(stored);
        }

        let path = self.path_for(endpoint);
        tracing::debug!("Reading {}", path.display());

        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ContentError::ResourceNotFound(path.display().to_string()),
            _ => ContentError::Io(e),
        })?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write(&self, endpoint: &str, method: Method, body: &Value) -> Result<Value> {
        if !self.save_delay.is_zero() {
            tokio::time::sleep(self.save_delay).await;
        }

        let key = cache::cache_key(endpoint);
        self.cache.put(&key, body);
        tracing::info!("Saved {} locally ({})", key, method);

        Ok(body.clone())
    }
}
