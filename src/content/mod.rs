//! The content store: cache-aside reads and whole-resource writes over a
//! [`Transport`], with typed accessors for each entity.
//!
//! ```text
//! Collection / SettingsAccessor → ContentStore::fetch / save → CacheStore + Transport
//! ```

pub mod collection;
pub mod ids;
pub mod images;
pub mod settings;

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};

use crate::app::Result;
use crate::cache::{self, CacheEntryStatus, CacheStore, Lookup};
use crate::clock::Clock;
use crate::config::StoreConfig;
use crate::domain::{Entity, GalleryItem, NewsItem, Product};
use crate::transport::{Method, Transport};

pub use collection::Collection;
pub use ids::IdGenerator;
pub use images::ImageResolver;
pub use settings::SettingsAccessor;

/// Options for [`ContentStore::fetch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions<'a> {
    pub method: Method,
    pub body: Option<&'a Value>,
    /// Overrides `StoreConfig::use_cache` when set.
    pub use_cache: Option<bool>,
}

impl<'a> FetchOptions<'a> {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn uncached() -> Self {
        Self {
            use_cache: Some(false),
            ..Self::default()
        }
    }

    pub fn send(method: Method, body: &'a Value) -> Self {
        Self {
            method,
            body: Some(body),
            use_cache: None,
        }
    }
}

/// Result of a write. Failures are reported here rather than raised.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(Value),
    Failed(String),
}

impl SaveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SaveOutcome::Failed(e) => Some(e),
            SaveOutcome::Saved(_) => None,
        }
    }
}

pub struct ContentStore {
    config: StoreConfig,
    transport: Arc<dyn Transport>,
    cache: Arc<CacheStore>,
    clock: Arc<dyn Clock>,
    images: ImageResolver,
    ids: IdGenerator,
    write_locks: HashMap<Entity, Mutex<()>>,
}

impl ContentStore {
    pub fn new(
        config: StoreConfig,
        transport: Arc<dyn Transport>,
        cache: Arc<CacheStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let images = ImageResolver::for_config(&config);
        let ids = IdGenerator::new(clock.clone());
        let write_locks = Entity::ALL.iter().map(|e| (*e, Mutex::new(()))).collect();

        Self {
            config,
            transport,
            cache,
            clock,
            images,
            ids,
            write_locks,
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    pub fn products(&self) -> Collection<'_, Product> {
        Collection::new(self)
    }

    pub fn news(&self) -> Collection<'_, NewsItem> {
        Collection::new(self)
    }

    pub fn gallery(&self) -> Collection<'_, GalleryItem> {
        Collection::new(self)
    }

    pub fn settings(&self) -> SettingsAccessor<'_> {
        SettingsAccessor::new(self)
    }

    /// Cache-aside read (or a pass-through write for non-GET methods).
    ///
    /// A fresh cached entry short-circuits the transport. On transport
    /// failure the last cached value is served regardless of age; the error
    /// surfaces only when nothing is cached.
    pub async fn fetch(&self, endpoint: &str, options: FetchOptions<'_>) -> Result<Value> {
        let method = options.method;
        let use_cache = options.use_cache.unwrap_or(self.config.use_cache);
        let key = cache::cache_key(endpoint);

        let mut stale = None;
        if method == Method::Get && use_cache {
            match self.cache.lookup::<Value>(&key) {
                Lookup::Fresh(value) => {
                    tracing::debug!("Loaded from cache: {}", endpoint);
                    return Ok(value);
                }
                Lookup::Stale(value) => stale = Some(value),
                Lookup::Missing => {}
            }
        }

        tracing::debug!("Fetching {} {}", method, endpoint);
        let result = match method {
            Method::Get => self.transport.read(endpoint).await,
            _ => {
                let body = options.body.unwrap_or(&Value::Null);
                self.transport.write(endpoint, method, body).await
            }
        };

        match result {
            Ok(data) => {
                if method == Method::Get && use_cache {
                    self.cache.put(&key, &data);
                }
                tracing::debug!("Fetched {}", endpoint);
                Ok(data)
            }
            Err(e) => {
                tracing::error!("Fetch error [{}]: {}", endpoint, e);

                if use_cache {
                    let cached = stale.or_else(|| self.cache.lookup::<Value>(&key).any());
                    if let Some(value) = cached {
                        tracing::warn!("Using cached fallback for {}", endpoint);
                        return Ok(value);
                    }
                }

                Err(e)
            }
        }
    }

    /// Write a whole resource. Never fails; check [`SaveOutcome::is_success`].
    ///
    /// A successful write also refreshes the cached copy so later reads
    /// see it.
    pub async fn save(&self, endpoint: &str, data: &Value, method: Method) -> SaveOutcome {
        let options = FetchOptions {
            method,
            body: Some(data),
            use_cache: Some(false),
        };

        match self.fetch(endpoint, options).await {
            Ok(response) => {
                if self.config.use_cache {
                    self.cache.put(&cache::cache_key(endpoint), data);
                }
                tracing::info!("Saved {}", endpoint);
                SaveOutcome::Saved(response)
            }
            Err(e) => SaveOutcome::Failed(e.to_string()),
        }
    }

    pub fn clear_cache(&self, key: Option<&str>) -> Result<()> {
        self.cache.clear(key)
    }

    pub fn cache_status(&self) -> Result<Vec<CacheEntryStatus>> {
        self.cache.status()
    }

    pub(crate) fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    pub(crate) fn next_id(&self, entity: Entity) -> String {
        self.ids.next(entity.id_prefix().unwrap_or("item"))
    }

    /// Serializes read-modify-write cycles on one entity.
    pub(crate) async fn lock(&self, entity: Entity) -> MutexGuard<'_, ()> {
        // every entity gets a lock in `new`
        self.write_locks[&entity].lock().await
    }
}
