use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Where content is read from and written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Static JSON files, with edits kept in the cache.
    #[default]
    Local,
    /// A JSON HTTP API.
    Api,
}

/// Configuration for the content store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Local files or remote API (default: local)
    pub mode: Mode,

    /// Directory holding the JSON resources in local mode (default: "data/")
    pub local_base_path: PathBuf,

    /// Base URL of the content API (default: "/api/")
    pub api_base_path: String,

    /// Serve reads from the cache while fresh (default: true)
    pub use_cache: bool,

    /// Namespace for every cache key (default: "cukraren_")
    pub cache_prefix: String,

    /// How long a cached entry stays fresh, in seconds (default: 300)
    pub cache_duration_secs: u64,

    /// Artificial latency for local-mode saves, in milliseconds (default: 0)
    pub save_delay_ms: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,

    /// SQLite file backing the cache (default: platform data dir)
    pub cache_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Local,
            local_base_path: PathBuf::from("data/"),
            api_base_path: "/api/".to_string(),
            use_cache: true,
            cache_prefix: "cukraren_".to_string(),
            cache_duration_secs: 300,
            save_delay_ms: 0,
            request_timeout_secs: 10,
            cache_path: None,
        }
    }
}

impl StoreConfig {
    pub fn cache_duration(&self) -> Duration {
        Duration::from_secs(self.cache_duration_secs)
    }

    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Remote mode against `api_base_path`.
    pub fn api(api_base_path: impl Into<String>) -> Self {
        Self {
            mode: Mode::Api,
            api_base_path: api_base_path.into(),
            ..Default::default()
        }
    }
}
