use serde::{Deserialize, Serialize};

use super::Record;

/// A launch pad with its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl Record for Pad {
    const COLLECTION: &'static str = "pads";
    const CACHE_KEY: &'static str = "cached_pads";

    fn id(&self) -> &str {
        &self.id
    }
}
