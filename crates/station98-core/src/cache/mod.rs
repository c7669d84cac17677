//! Local caching module for offline data access.
//!
//! This module provides the `CacheStore` for keeping the last good copy of
//! each collection on disk. Entries are JSON files named `{key}.json` and
//! never expire: the network is always tried first and the cache is only a
//! pre-fill and a fallback.

pub mod store;

pub use store::{CacheError, CacheStore, CachedData};
