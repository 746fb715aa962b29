use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{ContentError, Result};
use crate::cache::CacheStore;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::content::ContentStore;
use crate::store::{KeyValueStore, SqliteStore};
use crate::transport;

pub struct AppContext {
    pub config: Config,
    pub content: ContentStore,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let cache_path = match &config.store.cache_path {
            Some(p) => p.clone(),
            None => Self::default_cache_path()?,
        };

        let backend = Arc::new(SqliteStore::new(&cache_path)?);
        Self::with_backend(config, backend)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let backend = Arc::new(SqliteStore::in_memory()?);
        Self::with_backend(config, backend)
    }

    pub fn with_backend(
        config: Config,
        backend: Arc<dyn KeyValueStore + Send + Sync>,
    ) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let cache = Arc::new(CacheStore::new(
            backend,
            config.store.cache_prefix.clone(),
            config.store.cache_duration(),
            clock.clone(),
        ));
        let transport = transport::for_config(&config.store, cache.clone())?;
        let content = ContentStore::new(config.store.clone(), transport, cache, clock);

        Ok(Self { config, content })
    }

    fn default_cache_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| ContentError::Config("Could not find data directory".into()))?;
        let app_dir = data_dir.join("cukraren");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("cache.db"))
    }
}
