//! Station98 core - launch tracking data for any front end.
//!
//! Records are read from a PocketBase backend, kept on disk as the last good
//! copy, and exposed through observable fetch state:
//!
//! - [`api`]: collection queries (`PocketBaseClient`, `RecordSource`)
//! - [`cache`]: file-backed `CacheStore`
//! - [`sync`]: the generic stale-while-revalidate `SyncFetcher`
//! - [`feed`]: merged, classified update/video feed
//! - [`resolve`]: joins between collections by foreign key

pub mod api;
pub mod cache;
pub mod config;
pub mod feed;
pub mod models;
pub mod resolve;
pub mod sync;
pub mod utils;

pub use api::{ApiError, PocketBaseClient, QueryParams, RecordSource};
pub use cache::CacheStore;
pub use config::Config;
pub use sync::{Catalog, DataOrigin, FetchState, SyncFetcher};
