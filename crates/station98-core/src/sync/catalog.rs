//! Ready-made fetchers and composite loads for the app's views.

use std::sync::Arc;

use super::{FetchState, SyncFetcher};
use crate::api::{Filter, QueryParams, RecordSource};
use crate::cache::CacheStore;
use crate::feed::{merge_feed, FeedItem};
use crate::models::{LaunchEvent, LaunchProvider, Mission, Record, DEFAULT_PAGE_SIZE};
use crate::resolve::{active_providers, missions_with_events};

/// Events that carry updates or videos
pub const MEDIA_EVENTS_CACHE_KEY: &str = "cached_event_media";

/// Events linked to a mission, with the mission expanded
pub const MISSION_EVENTS_CACHE_KEY: &str = "cached_mission_events";

/// Shared source and cache from which fetchers are built.
pub struct Catalog<S> {
    source: Arc<S>,
    cache: Arc<CacheStore>,
}

impl<S> Clone for Catalog<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S: RecordSource> Catalog<S> {
    pub fn new(source: Arc<S>, cache: Arc<CacheStore>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Fetcher for a whole collection
    pub fn fetcher<T: Record>(&self) -> SyncFetcher<T, S> {
        SyncFetcher::new(Arc::clone(&self.source), Arc::clone(&self.cache))
    }

    pub fn media_events(&self) -> SyncFetcher<LaunchEvent, S> {
        let params = QueryParams::new()
            .per_page(DEFAULT_PAGE_SIZE)
            .filter(Filter::not_empty("vid_urls").or(Filter::not_empty("updates")));
        SyncFetcher::with_query(
            Arc::clone(&self.source),
            Arc::clone(&self.cache),
            MEDIA_EVENTS_CACHE_KEY,
            params,
        )
    }

    pub fn mission_events(&self) -> SyncFetcher<LaunchEvent, S> {
        let params = QueryParams::new()
            .per_page(DEFAULT_PAGE_SIZE)
            .filter(Filter::not_empty("mission_id"))
            .expand("mission_id");
        SyncFetcher::with_query(
            Arc::clone(&self.source),
            Arc::clone(&self.cache),
            MISSION_EVENTS_CACHE_KEY,
            params,
        )
    }

    /// Fetch media events and merge them into one feed
    pub async fn load_feed(&self) -> FeedSnapshot {
        let events = self.media_events().fetch().await;
        let items = merge_feed(&events.items);
        FeedSnapshot { events, items }
    }

    /// Fetch providers and events together and work out which providers are active
    pub async fn load_provider_directory(&self) -> ProviderDirectory {
        let providers = self.fetcher::<LaunchProvider>();
        let events = self.fetcher::<LaunchEvent>();
        let (providers, events) = futures::join!(providers.fetch(), events.fetch());
        let active = active_providers(&providers.items, &events.items);
        ProviderDirectory {
            providers,
            events,
            active,
        }
    }

    pub async fn load_missions(&self) -> MissionCatalog {
        let missions = self.fetcher::<Mission>();
        let events = self.mission_events();
        let (missions, events) = futures::join!(missions.fetch(), events.fetch());
        MissionCatalog { missions, events }
    }
}

#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub events: FetchState<LaunchEvent>,
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone)]
pub struct ProviderDirectory {
    pub providers: FetchState<LaunchProvider>,
    pub events: FetchState<LaunchEvent>,
    /// Providers with at least one current event
    pub active: Vec<LaunchProvider>,
}

#[derive(Debug, Clone)]
pub struct MissionCatalog {
    pub missions: FetchState<Mission>,
    pub events: FetchState<LaunchEvent>,
}

impl MissionCatalog {
    /// Missions that have at least one event, with those events
    pub fn grouped(&self) -> Vec<(&Mission, Vec<&LaunchEvent>)> {
        missions_with_events(&self.missions.items, &self.events.items)
    }
}
