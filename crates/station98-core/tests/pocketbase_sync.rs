use std::sync::Arc;

use serde_json::json;
use station98_core::api::{ApiError, Filter, PocketBaseClient, QueryParams, RecordSource};
use station98_core::cache::CacheStore;
use station98_core::models::{Envelope, LaunchEvent, Pad, Record};
use station98_core::sync::{Catalog, DataOrigin, SyncFetcher};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nothing listens on port 1, so connections are refused immediately
const UNREACHABLE: &str = "http://127.0.0.1:1";

fn pads_json(names: &[&str]) -> serde_json::Value {
    let items: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "id": format!("pad{}", i),
                "collectionName": "pads",
                "name": name,
                "latitude": 28.6,
                "longitude": -80.6,
                "location_name": "Cape Canaveral"
            })
        })
        .collect();
    json!({ "page": 1, "perPage": 200, "totalItems": names.len(), "totalPages": 1, "items": items })
}

fn cache() -> (TempDir, Arc<CacheStore>) {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().join("cache")).unwrap();
    (dir, Arc::new(store))
}

#[tokio::test]
async fn query_sends_params_and_decodes_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/collections/events/records"))
        .and(query_param("perPage", "200"))
        .and(query_param("filter", "(vid_urls!=''||updates!='')"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "e1",
                "title": "Crew-11",
                "datetime": "2025-07-31T15:43:00.000Z",
                "updates": [{"id": "u1", "title": "Go for launch", "description": "https://x.com/a/status/1", "created_at": "2025-07-31T10:00:00Z"}]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PocketBaseClient::new(server.uri()).unwrap();
    let params = QueryParams::new()
        .per_page(200)
        .filter(Filter::not_empty("vid_urls").or(Filter::not_empty("updates")));
    let envelope: Envelope<LaunchEvent> = client.query("events", &params).await.unwrap();

    assert_eq!(envelope.items.len(), 1);
    assert_eq!(envelope.items[0].updates().len(), 1);
}

#[tokio::test]
async fn non_success_status_maps_to_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/collections/pads/records"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = PocketBaseClient::new(server.uri()).unwrap();
    let result: Result<Envelope<Pad>, ApiError> = client.query("pads", &QueryParams::new()).await;
    let err = result.unwrap_err();
    assert!(matches!(err, ApiError::ServerError(ref body) if body == "maintenance"));
}

#[tokio::test]
async fn schema_mismatch_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/collections/pads/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": []})))
        .mount(&server)
        .await;

    let client = PocketBaseClient::new(server.uri()).unwrap();
    let result: Result<Envelope<Pad>, ApiError> = client.query("pads", &QueryParams::new()).await;
    let err = result.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn fresh_response_overwrites_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/collections/pads/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pads_json(&["SLC-40", "LC-39A"])))
        .mount(&server)
        .await;

    let (_dir, cache) = cache();
    let stale: Envelope<Pad> = serde_json::from_value(pads_json(&["Old Pad"])).unwrap();
    cache.save(Pad::CACHE_KEY, &stale);

    let client = Arc::new(PocketBaseClient::new(server.uri()).unwrap());
    let fetcher: SyncFetcher<Pad, _> = SyncFetcher::new(client, cache.clone());
    let state = fetcher.fetch().await;

    let names: Vec<_> = state.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["SLC-40", "LC-39A"]);
    assert_eq!(state.origin, DataOrigin::Network);

    let stored: Envelope<Pad> = cache.load(Pad::CACHE_KEY).unwrap();
    assert_eq!(stored.items, state.items);
}

#[tokio::test]
async fn unreachable_server_uses_cache() {
    let (_dir, cache) = cache();
    let cached: Envelope<Pad> = serde_json::from_value(pads_json(&["LC-39A", "SLC-4E"])).unwrap();
    cache.save(Pad::CACHE_KEY, &cached);

    let client = Arc::new(PocketBaseClient::new(UNREACHABLE).unwrap());
    let fetcher: SyncFetcher<Pad, _> = SyncFetcher::new(client, cache);
    let state = fetcher.fetch().await;

    assert_eq!(state.error, None);
    assert_eq!(state.items, cached.items);
    assert_eq!(state.origin, DataOrigin::Cache);
}

#[tokio::test]
async fn unreachable_server_cold_start_reports_error() {
    let (_dir, cache) = cache();
    let client = Arc::new(PocketBaseClient::new(UNREACHABLE).unwrap());
    let fetcher: SyncFetcher<Pad, _> = SyncFetcher::new(client, cache);
    let state = fetcher.fetch().await;

    assert!(state.items.is_empty());
    assert!(state.error.is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn malformed_base_url_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pads_json(&["x"])))
        .expect(0)
        .mount(&server)
        .await;

    let (_dir, cache) = cache();
    let client = Arc::new(PocketBaseClient::new(format!("{}::bad", server.uri())).unwrap());
    let fetcher: SyncFetcher<Pad, _> = SyncFetcher::new(client, cache.clone());
    let state = fetcher.fetch().await;

    assert!(state.error.is_some());
    assert!(cache.load::<Envelope<Pad>>(Pad::CACHE_KEY).is_none());
}

#[tokio::test]
async fn feed_from_backend_is_sorted_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/collections/events/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "A", "title": "A", "datetime": "2024-12-31T00:00:00Z",
                 "updates": [{"id": "a1", "title": "Rollout", "description": "", "created_at": "2025-01-01T10:00:00Z"}]},
                {"id": "B", "title": "B", "datetime": "2024-12-31T00:00:00Z",
                 "updates": [
                    {"id": "b1", "title": "Scrubbed", "description": "", "created_at": "2025-01-02T10:00:00Z"},
                    {"id": "bad", "title": "Broken", "description": "", "created_at": "not-a-date"}
                 ]}
            ]
        })))
        .mount(&server)
        .await;

    let (_dir, cache) = cache();
    let catalog = Catalog::new(Arc::new(PocketBaseClient::new(server.uri()).unwrap()), cache);
    let snapshot = catalog.load_feed().await;

    let ids: Vec<_> = snapshot.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["b1", "a1"]);
}
