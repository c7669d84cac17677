//! HTTP client for the PocketBase collection API.
//!
//! Every collection is read through the same endpoint,
//! `GET {base}/api/collections/{name}/records`, which answers with an
//! `{ items: [...] }` envelope. One attempt per call: no retries, no
//! backoff, and the transport's default timeout.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ApiError, QueryParams};
use crate::models::Envelope;

/// Local PocketBase instance used during development
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Where collection records come from.
///
/// Building the URL is split from sending the request so callers can fail
/// fast on a malformed request before touching anything else.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Build the request URL for `collection` with `params`
    fn request_url(&self, collection: &str, params: &QueryParams) -> Result<Url, ApiError>;

    /// Send one GET to `url` and decode the envelope
    async fn fetch<T>(&self, url: Url) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned + Send;

    async fn query<T>(&self, collection: &str, params: &QueryParams) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.request_url(collection, params)?;
        self.fetch(url).await
    }
}

/// API client for a PocketBase backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct PocketBaseClient {
    client: Client,
    base_url: String,
}

impl PocketBaseClient {
    /// Create a new client for the backend at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client sharing an existing connection pool
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Collection names are plain identifiers in PocketBase
    fn is_valid_collection(name: &str) -> bool {
        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

#[async_trait]
impl RecordSource for PocketBaseClient {
    fn request_url(&self, collection: &str, params: &QueryParams) -> Result<Url, ApiError> {
        if !Self::is_valid_collection(collection) {
            return Err(ApiError::InvalidUrl(format!(
                "invalid collection name {:?}",
                collection
            )));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                self.base_url,
                url.scheme()
            )));
        }

        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "collections", collection, "records"]);

        let pairs = params.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    async fn fetch<T>(&self, url: Url) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        debug!(url = %url, "Fetching collection");
        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let text = response.text().await?;

        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse {}: {}", url.path(), e))
        })
    }
}
