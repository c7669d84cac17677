use chrono::{DateTime, Utc};

use crate::models::{EventUpdate, EventVideo, LaunchEvent};
use crate::utils::{format_relative, parse_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedCategory {
    Update,
    Video,
}

/// The record a feed item was built from.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedSource {
    Update(EventUpdate),
    Video(EventVideo),
}

/// One entry of the merged feed. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    /// Update id, or the URL for videos
    pub id: String,
    pub event_id: String,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub source: FeedSource,
}

impl FeedItem {
    fn from_update(event: &LaunchEvent, update: &EventUpdate) -> Option<Self> {
        let timestamp = parse_timestamp(&update.created_at)?;
        Some(Self {
            id: update.id.clone(),
            event_id: event.id.clone(),
            title: update.title.clone(),
            description: update.description.clone(),
            timestamp,
            source: FeedSource::Update(update.clone()),
        })
    }

    /// Videos carry no time of their own and take the event's datetime.
    fn from_video(event: &LaunchEvent, video: &EventVideo, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: video.url.clone(),
            event_id: event.id.clone(),
            title: video.title.clone(),
            description: video.url.clone(),
            timestamp,
            source: FeedSource::Video(video.clone()),
        }
    }

    pub fn category(&self) -> FeedCategory {
        match self.source {
            FeedSource::Update(_) => FeedCategory::Update,
            FeedSource::Video(_) => FeedCategory::Video,
        }
    }

    pub fn relative_time(&self, now: DateTime<Utc>) -> String {
        format_relative(self.timestamp, now)
    }
}

/// Merge the updates and videos of `events` into one feed, newest first.
///
/// Updates with an unparseable `created_at`, and videos of events with an
/// unparseable `datetime`, are left out. Items with equal timestamps keep
/// event order, then updates before videos, then server order.
pub fn merge_feed(events: &[LaunchEvent]) -> Vec<FeedItem> {
    let mut items = Vec::new();
    for event in events {
        items.extend(
            event
                .updates()
                .iter()
                .filter_map(|update| FeedItem::from_update(event, update)),
        );
        if let Some(timestamp) = event.parsed_datetime() {
            items.extend(
                event
                    .videos()
                    .iter()
                    .map(|video| FeedItem::from_video(event, video, timestamp)),
            );
        }
    }
    // sort_by is stable
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items
}

/// Feed for a single event
pub fn event_feed(event: &LaunchEvent) -> Vec<FeedItem> {
    merge_feed(std::slice::from_ref(event))
}
