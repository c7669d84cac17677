use serde::{Deserialize, Serialize};

use super::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub orbit: Option<String>,
}

impl Record for Mission {
    const COLLECTION: &'static str = "missions";
    const CACHE_KEY: &'static str = "cached_missions";

    fn id(&self) -> &str {
        &self.id
    }
}
