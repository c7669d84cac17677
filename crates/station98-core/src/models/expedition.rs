use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::Record;
use crate::api::QueryParams;
use crate::utils::parse_timestamp;

/// A space station expedition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expedition {
    pub id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub patches: Option<String>,
    #[serde(default)]
    pub station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<ExpeditionExpand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpeditionExpand {
    #[serde(default)]
    pub station: Option<Station>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
}

impl Record for Expedition {
    const COLLECTION: &'static str = "expeditions";
    const CACHE_KEY: &'static str = "cached_expeditions";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_params() -> QueryParams {
        QueryParams::new()
            .expand("station")
            .sort("-start_date")
            .per_page(30)
    }
}

impl Expedition {
    pub fn station_name(&self) -> &str {
        self.expand
            .as_ref()
            .and_then(|e| e.station.as_ref())
            .map(|s| s.name.as_str())
            .unwrap_or("Unknown")
    }

    /// Year the expedition ended, read from the leading digits of `end_date`.
    /// Zero when they are not a year.
    pub fn end_year(&self) -> i32 {
        self.end_date
            .get(..4)
            .and_then(|y| y.parse().ok())
            .unwrap_or(0)
    }
}

/// Expeditions grouped for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpeditionSections {
    pub this_year: Vec<Expedition>,
    pub archived: Vec<Expedition>,
}

/// Split expeditions into those ending in `current_year` and earlier ones.
/// Expeditions ending after `current_year` appear in neither section.
pub fn partition_expeditions(expeditions: &[Expedition], current_year: i32) -> ExpeditionSections {
    let mut sections = ExpeditionSections::default();
    for expedition in expeditions {
        let year = expedition.end_year();
        if year == current_year {
            sections.this_year.push(expedition.clone());
        } else if year < current_year {
            sections.archived.push(expedition.clone());
        }
    }
    sections
}

/// A recorded extravehicular activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spacewalk {
    pub id: String,
    #[serde(default)]
    pub api_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub event_id: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub expedition_name: Option<String>,
}

impl Record for Spacewalk {
    const COLLECTION: &'static str = "spacewalks";
    const CACHE_KEY: &'static str = "cached_spacewalks";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_params() -> QueryParams {
        QueryParams::new().per_page(100).sort("-start_time")
    }
}

impl Spacewalk {
    /// A spacewalk from a previous year. Unparseable start times are never archived.
    pub fn is_archived(&self, current_year: i32) -> bool {
        parse_timestamp(&self.start_time)
            .map(|start| start.year() < current_year)
            .unwrap_or(false)
    }
}

/// Split spacewalks into (recent, archived), preserving order.
pub fn partition_spacewalks(walks: &[Spacewalk], current_year: i32) -> (Vec<Spacewalk>, Vec<Spacewalk>) {
    walks
        .iter()
        .cloned()
        .partition(|walk| !walk.is_archived(current_year))
}
