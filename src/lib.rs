//! # Cukráreň
//!
//! Content store for the Cukráreň Janka bakery website: products, news,
//! gallery and shop settings behind one cache-aside read/write interface.
//!
//! ## Architecture
//!
//! ```text
//! Collection / SettingsAccessor → ContentStore → CacheStore → KeyValueStore
//!                                              ↘ Transport (local files | HTTP API)
//! ```
//!
//! - [`content`]: the `ContentStore` facade and typed entity accessors
//! - [`cache`]: prefixed, time-limited cache entries
//! - [`transport`]: where resources are read from and written to
//! - [`store`]: SQLite-backed key/value storage for the cache
//!
//! ## Quick Start
//!
//! ```bash
//! # List products from data/produkty.json
//! cukraren products list
//!
//! # Publish a news item dated today
//! cukraren news add --title "Veľkonočné koláče"
//!
//! # Inspect the cache
//! cukraren cache status
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config, cache
/// backend, transport and content store.
pub mod app;

/// Prefixed JSON cache with per-entry timestamps and a freshness window.
pub mod cache;

/// Command-line interface using clap.
///
/// - `products|news|gallery list|add|update|delete`
/// - `settings show|set`
/// - `cache status|clear`
pub mod cli;

/// Injectable time source.
pub mod clock;

/// Configuration management.
///
/// Loads from `~/.config/cukraren/config.toml`.
pub mod config;

/// Cache-aside fetch and whole-resource save, plus entity accessors.
///
/// - [`ContentStore`](content::ContentStore): the facade
/// - [`Collection`](content::Collection): products, news, gallery
/// - [`SettingsAccessor`](content::SettingsAccessor): the settings singleton
/// - [`ImageResolver`](content::ImageResolver): image URL and placeholder resolution
pub mod content;

/// Core domain models.
///
/// - [`Product`](domain::Product), [`NewsItem`](domain::NewsItem),
///   [`GalleryItem`](domain::GalleryItem), [`Settings`](domain::Settings)
pub mod domain;

/// Key/value persistence.
///
/// - [`KeyValueStore`](store::KeyValueStore): storage trait
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;

/// Reading and writing named resources.
///
/// - [`Transport`](transport::Transport): async trait
/// - [`LocalTransport`](transport::LocalTransport): JSON files, writes kept in the cache
/// - [`HttpTransport`](transport::HttpTransport): reqwest-based API client
pub mod transport;
