use serde::{Deserialize, Serialize};

use super::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchProvider {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub abbrev: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(rename = "type", default)]
    pub provider_type: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub wiki_url: Option<String>,
    #[serde(default)]
    pub info_url: Option<String>,
    /// Numeric agency id from The Space Devs; events reference it as text
    #[serde(default)]
    pub spacedevs_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    /// Founding year as sent by the backend, e.g. "2002"
    #[serde(default)]
    pub founded: Option<String>,
}

impl Record for LaunchProvider {
    const COLLECTION: &'static str = "launch_providers";
    const CACHE_KEY: &'static str = "cached_providers";

    fn id(&self) -> &str {
        &self.id
    }
}

impl LaunchProvider {
    /// First letter of the name, uppercased, for alphabetical grouping
    pub fn name_initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    /// Up to three uppercase letters of the country code, "UNK" when unset
    pub fn display_country_code(&self) -> String {
        match self.country_code.as_deref() {
            Some(code) if !code.is_empty() => code.chars().take(3).collect::<String>().to_uppercase(),
            _ => "UNK".to_string(),
        }
    }
}
