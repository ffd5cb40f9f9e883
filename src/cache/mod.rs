//! Tiered caching for the program feed.
//!
//! The processed collection is stored as a JSON `{data, cached_at}`
//! envelope under a single key and served back within a 2-minute
//! freshness window. Expired entries are evicted lazily on read, but can
//! still be served as a last-resort fallback when a fetch fails.

pub mod manager;
pub mod store;

pub use manager::{CacheManager, CachedData};
pub use store::{CacheStore, FileStore, MemoryStore};
