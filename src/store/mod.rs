pub mod sqlite;

use crate::app::Result;

pub use sqlite::SqliteStore;

/// String-keyed persistent storage shared by everything under one origin.
///
/// Implementations hold raw text; namespacing and expiry belong to
/// [`CacheStore`](crate::cache::CacheStore).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}
