pub mod http;
pub mod local;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::Result;
use crate::cache::CacheStore;
use crate::config::{Mode, StoreConfig};

pub use http::HttpTransport;
pub use local::LocalTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads and writes named JSON resources such as `produkty.json`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn read(&self, endpoint: &str) -> Result<Value>;

    /// Replace (or create) the resource. Returns the stored representation.
    async fn write(&self, endpoint: &str, method: Method, body: &Value) -> Result<Value>;
}

/// Build the transport selected by `config.mode`.
pub fn for_config(config: &StoreConfig, cache: Arc<CacheStore>) -> Result<Arc<dyn Transport>> {
    let transport: Arc<dyn Transport> = match config.mode {
        Mode::Local => Arc::new(LocalTransport::new(
            &config.local_base_path,
            cache,
            config.save_delay(),
        )),
        Mode::Api => Arc::new(HttpTransport::new(
            &config.api_base_path,
            config.request_timeout(),
        )?),
    };
    Ok(transport)
}
