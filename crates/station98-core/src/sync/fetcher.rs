use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, warn};

use crate::api::{QueryParams, RecordSource};
use crate::cache::CacheStore;
use crate::models::{Envelope, Record};

/// Where the items currently held by a fetcher came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataOrigin {
    #[default]
    None,
    Cache,
    Network,
}

/// Observable state of one fetcher.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub items: Vec<T>,
    pub origin: DataOrigin,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            items: Vec::new(),
            origin: DataOrigin::None,
        }
    }
}

/// Stale-while-revalidate loader for one collection.
///
/// Each fetch pre-fills from the cache, queries the backend, and on success
/// replaces the items and rewrites the cache. A failed query with a cache
/// entry on hand is absorbed; without one it becomes the error message.
///
/// Overlapping `fetch` calls are not coordinated; whichever finishes last
/// determines the final state.
pub struct SyncFetcher<T: Record, S> {
    source: Arc<S>,
    cache: Arc<CacheStore>,
    cache_key: String,
    params: QueryParams,
    state: watch::Sender<FetchState<T>>,
}

impl<T: Record, S: RecordSource> SyncFetcher<T, S> {
    /// Fetcher for the record type's default query and cache key
    pub fn new(source: Arc<S>, cache: Arc<CacheStore>) -> Self {
        Self::with_query(source, cache, T::CACHE_KEY, T::default_params())
    }

    /// Fetcher for a custom query. Filtered variants should use their own
    /// cache key so they don't overwrite the full collection.
    pub fn with_query(
        source: Arc<S>,
        cache: Arc<CacheStore>,
        cache_key: impl Into<String>,
        params: QueryParams,
    ) -> Self {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            source,
            cache,
            cache_key: cache_key.into(),
            params,
            state,
        }
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.state.borrow().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Run one cache-then-network cycle and return the resulting state.
    pub async fn fetch(&self) -> FetchState<T> {
        let collection = T::COLLECTION;
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let url = match self.source.request_url(collection, &self.params) {
            Ok(url) => url,
            Err(e) => {
                error!(collection, error = %e, "Could not build collection request");
                self.state.send_modify(|s| {
                    s.error = Some(e.to_string());
                    s.loading = false;
                });
                return self.state();
            }
        };

        let cached = self.cache.load::<Envelope<T>>(&self.cache_key);
        if let Some(ref envelope) = cached {
            debug!(collection, count = envelope.len(), "Pre-filling from cache");
            self.state.send_modify(|s| {
                s.items = envelope.items.clone();
                s.origin = DataOrigin::Cache;
            });
        }

        let fresh: Result<Envelope<T>, _> = self.source.fetch(url).await;
        match fresh {
            Ok(envelope) => {
                debug!(collection, count = envelope.len(), "Fetched from network");
                self.cache.save(&self.cache_key, &envelope);
                self.state.send_modify(|s| {
                    s.items = envelope.items;
                    s.error = None;
                    s.origin = DataOrigin::Network;
                    s.loading = false;
                });
            }
            Err(e) if cached.is_some() => {
                warn!(collection, error = %e, "Fetch failed, keeping cached data");
                self.state.send_modify(|s| {
                    s.error = None;
                    s.loading = false;
                });
            }
            Err(e) => {
                warn!(collection, error = %e, "Fetch failed with nothing cached");
                self.state.send_modify(|s| {
                    s.error = Some(format!("Couldn't load {} - check your connection ({})", collection, e));
                    s.loading = false;
                });
            }
        }

        self.state()
    }
}
