use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Mission, Record};
use crate::utils::parse_timestamp;

/// A launch event, the central record of the backend.
///
/// The backend schema grows through migrations, so everything beyond
/// id/title/datetime is optional and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchEvent {
    pub id: String,
    pub title: String,
    pub datetime: String,
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Launch provider id from The Space Devs, stored as text
    #[serde(default)]
    pub spacedevs_id: Option<String>,
    #[serde(default)]
    pub mission_id: Option<String>,
    #[serde(default)]
    pub updates: Option<Vec<EventUpdate>>,
    #[serde(default)]
    pub vid_urls: Option<Vec<EventVideo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<EventExpand>,

    // Launch status fields added by later migrations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_abbrev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webcast_live: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rocket_name: Option<String>,
}

/// Relations expanded inline by the backend (`expand=mission_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventExpand {
    #[serde(rename = "mission_id", alias = "mission", default)]
    pub mission: Option<Mission>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventUpdate {
    pub id: String,
    pub title: String,
    /// Free text, often a link to an article or a post
    #[serde(default)]
    pub description: String,
    pub created_at: String,
}

/// A video link attached to an event. Identified by its URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventVideo {
    #[serde(default)]
    pub priority: Option<i64>,
    pub title: String,
    pub url: String,
}

impl Record for LaunchEvent {
    const COLLECTION: &'static str = "events";
    const CACHE_KEY: &'static str = "cached_events";

    fn id(&self) -> &str {
        &self.id
    }
}

impl LaunchEvent {
    pub fn parsed_datetime(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.datetime)
    }

    /// Updates in server order; empty when the field is absent
    pub fn updates(&self) -> &[EventUpdate] {
        self.updates.as_deref().unwrap_or(&[])
    }

    /// Videos in server order; empty when the field is absent
    pub fn videos(&self) -> &[EventVideo] {
        self.vid_urls.as_deref().unwrap_or(&[])
    }

    pub fn has_media(&self) -> bool {
        !self.updates().is_empty() || !self.videos().is_empty()
    }

    /// Expanded mission, if the backend included it
    pub fn expanded_mission(&self) -> Option<&Mission> {
        self.expand.as_ref().and_then(|e| e.mission.as_ref())
    }

    /// Mission id, preferring the expanded relation over the raw field
    pub fn linked_mission_id(&self) -> Option<&str> {
        self.expanded_mission()
            .map(|m| m.id.as_str())
            .or_else(|| self.mission_id.as_deref().filter(|id| !id.is_empty()))
    }

    pub fn formatted_date(&self) -> String {
        match self.parsed_datetime() {
            Some(dt) => dt.format("%b %d, %Y %H:%M UTC").to_string(),
            None => "Unknown date".to_string(),
        }
    }
}
