//! Storage abstractions for the weather cache.
//!
//! Provides:
//! - The [`CacheStore`] trait the lookup service and sweeper are written against
//! - [`SqliteCacheStore`], the SQLite-backed append-only implementation

pub mod cache_store;
pub mod sqlite;

pub use cache_store::{normalize_city, CacheEntry, CacheStore};
pub use sqlite::SqliteCacheStore;
