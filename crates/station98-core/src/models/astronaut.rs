use serde::{Deserialize, Serialize};

use super::Record;
use crate::api::QueryParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Astronaut {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub in_space: bool,
    #[serde(default)]
    pub is_human: Option<bool>,
    #[serde(default)]
    pub agency: Option<String>,
    #[serde(default)]
    pub agency_type: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub date_of_death: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub wikipedia_url: Option<String>,
    #[serde(default)]
    pub first_flight: Option<String>,
    #[serde(default)]
    pub last_flight: Option<String>,
    #[serde(default)]
    pub flights_count: Option<i64>,
    #[serde(default)]
    pub landings_count: Option<i64>,
    #[serde(default)]
    pub spacewalks_count: Option<i64>,
    #[serde(default)]
    pub time_in_space: Option<String>,
    #[serde(default)]
    pub eva_time: Option<String>,
}

impl Record for Astronaut {
    const COLLECTION: &'static str = "astronauts";
    const CACHE_KEY: &'static str = "cached_astronauts";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_params() -> QueryParams {
        QueryParams::new().per_page(100)
    }
}
