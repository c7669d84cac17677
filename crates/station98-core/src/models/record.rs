use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::api::QueryParams;

/// Page size used when a collection does not ask for something else.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Uniform `{ items: [...] }` wrapper returned by every collection query.
///
/// PocketBase also reports paging counters; they are kept when present but
/// nothing depends on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    pub items: Vec<T>,
}

impl<T> Envelope<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            page: None,
            per_page: None,
            total_items: None,
            total_pages: None,
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A record type stored in one backend collection.
///
/// Ties the record shape to the collection it is queried from and the cache
/// key its last good envelope is stored under.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Backend collection name
    const COLLECTION: &'static str;

    /// Cache key; the file on disk is `{CACHE_KEY}.json`
    const CACHE_KEY: &'static str;

    /// Identifier, unique within the collection
    fn id(&self) -> &str;

    fn default_params() -> QueryParams {
        QueryParams::new().per_page(DEFAULT_PAGE_SIZE)
    }
}
