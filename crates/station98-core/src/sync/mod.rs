//! Cache-then-network synchronization of backend collections.
//!
//! `SyncFetcher` is the one generic loader used for every record type;
//! `Catalog` builds the fetchers and the composite loads the views need.

pub mod catalog;
pub mod fetcher;

pub use catalog::{
    Catalog, FeedSnapshot, MissionCatalog, ProviderDirectory, MEDIA_EVENTS_CACHE_KEY,
    MISSION_EVENTS_CACHE_KEY,
};
pub use fetcher::{DataOrigin, FetchState, SyncFetcher};
