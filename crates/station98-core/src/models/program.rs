use serde::{Deserialize, Serialize};

use super::Record;
use crate::api::QueryParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    #[serde(default)]
    pub api_id: Option<i64>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub program_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub info_url: Option<String>,
    #[serde(default)]
    pub wiki_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_thumb_url: Option<String>,
}

impl Record for Program {
    const COLLECTION: &'static str = "programs";
    const CACHE_KEY: &'static str = "cached_programs";

    fn id(&self) -> &str {
        &self.id
    }

    fn default_params() -> QueryParams {
        QueryParams::new().per_page(30).sort("-start_date")
    }
}
