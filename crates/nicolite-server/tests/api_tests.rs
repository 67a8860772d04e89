//! API integration tests.
//!
//! Upstream mirrors and the watch-info API are wiremock servers.

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use nicolite_core::{ClientConfig, NicoRelay};
use nicolite_server::{AppState, ServerConfig, create_router};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/api/v2/snapshot/video/contents/search";

fn create_test_router(search_hosts: Vec<String>, watch_api_base: String, public_dir: PathBuf) -> Router {
    let config = ServerConfig {
        public_dir,
        ..ServerConfig::default()
    };
    let relay = NicoRelay::with_config(ClientConfig {
        timeout_secs: 2,
        search_hosts,
        watch_api_base,
    })
    .unwrap();

    create_router(AppState::with_relay(config, relay))
}

fn offline_router() -> Router {
    create_test_router(
        vec!["http://127.0.0.1:1".to_string()],
        "http://127.0.0.1:1".to_string(),
        PathBuf::from("does-not-exist"),
    )
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = get(app, uri).await;
    let body = serde_json::from_slice(&bytes).expect("response should be JSON");
    (status, body)
}

fn snapshot_body() -> Value {
    json!({
        "meta": { "status": 200, "totalCount": 98765 },
        "data": [
            {
                "contentId": "sm9",
                "title": "新・豪血寺一族 -煩悩解放 - レッツゴー！陰陽師",
                "thumbnailUrl": "https://nicovideo.cdn.nimg.jp/thumbnails/9/9",
                "viewCounter": 21000000,
                "commentCounter": 5000000,
                "startTime": "2007-03-06T00:33:00+09:00",
                "lengthSeconds": 320
            },
            { "contentId": "so2" },
            { "contentId": "nm3", "title": "third" }
        ]
    })
}

async fn mirror(status: u16, expected_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    let template = if status == 200 {
        ResponseTemplate::new(200).set_body_json(snapshot_body())
    } else {
        ResponseTemplate::new(status)
    };
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(template)
        .expect(expected_calls)
        .mount(&server)
        .await;
    server
}

fn search_router(hosts: &[&MockServer]) -> Router {
    create_test_router(
        hosts.iter().map(|s| s.uri()).collect(),
        "http://127.0.0.1:1".to_string(),
        PathBuf::from("does-not-exist"),
    )
}

// ---------------------------------------------------------------------------
// /api/parse
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_parse_empty_query() {
    let (status, body) = get_json(offline_router(), "/api/parse?q=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "no video id found");
}

#[tokio::test]
async fn test_parse_missing_query() {
    let (status, body) = get_json(offline_router(), "/api/parse").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn test_parse_watch_url() {
    let (status, body) = get_json(offline_router(), "/api/parse?q=https://x/watch/sm9").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["id"], "sm9");
    assert_eq!(
        body["script"],
        "https://embed.nicovideo.jp/watch/sm9/script?w=1280&h=720"
    );
    assert_eq!(body["iframe"], "https://embed.nicovideo.jp/watch/sm9?w=1280&h=720");
    assert_eq!(body["watch"], "https://www.nicovideo.jp/watch/sm9");
}

#[tokio::test]
async fn test_parse_custom_size_and_case() {
    let (status, body) = get_json(offline_router(), "/api/parse?q=SO123&w=640&h=360").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "SO123");
    assert_eq!(
        body["script"],
        "https://embed.nicovideo.jp/watch/SO123/script?w=640&h=360"
    );
}

#[tokio::test]
async fn test_parse_repeated_key_uses_first_value() {
    let (status, body) = get_json(offline_router(), "/api/parse?q=sm9&q=other&w=640&w=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["id"], "sm9");
    assert_eq!(
        body["script"],
        "https://embed.nicovideo.jp/watch/sm9/script?w=640&h=720"
    );
}

#[tokio::test]
async fn test_parse_repeated_key_without_id_is_json_error() {
    let (status, body) = get_json(offline_router(), "/api/parse?q=none&q=sm9").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "no video id found");
}

// ---------------------------------------------------------------------------
// /api/search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_search_empty_query() {
    let primary = mirror(200, 0).await;

    let (status, body) = get_json(search_router(&[&primary]), "/api/search?q=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);

    let (status, _) = get_json(search_router(&[&primary]), "/api/search?q=%20%20%09").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(search_router(&[&primary]), "/api/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_success_on_first_mirror() {
    let primary = mirror(200, 1).await;
    let fallback = mirror(200, 0).await;

    let (status, body) = get_json(
        search_router(&[&primary, &fallback]),
        "/api/search?q=foo&offset=20",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["totalCount"], 98765);
    assert_eq!(body["nextOffset"], 23);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["id"], "sm9");
    assert_eq!(items[0]["thumbnailUrl"], "https://nicovideo.cdn.nimg.jp/thumbnails/9/9");
    assert_eq!(items[0]["viewCount"], 21000000);
    assert_eq!(items[0]["commentCount"], 5000000);
    assert_eq!(items[0]["startTime"], "2007-03-06T00:33:00+09:00");
    assert_eq!(items[0]["lengthSeconds"], 320);
    assert_eq!(items[1]["id"], "so2");
    assert!(items[1]["title"].is_null());
}

#[tokio::test]
async fn test_search_falls_back_to_second_mirror() {
    let primary = mirror(429, 1).await;
    let fallback = mirror(200, 1).await;

    let (status, body) =
        get_json(search_router(&[&primary, &fallback]), "/api/search?q=foo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_all_mirrors_blocked() {
    let primary = mirror(403, 1).await;
    let fallback = mirror(403, 1).await;

    let (status, body) =
        get_json(search_router(&[&primary, &fallback]), "/api/search?q=foo").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "search failed");
    assert_eq!(body["detail"]["host"], fallback.uri());
    assert_eq!(body["detail"]["status"], 403);
}

#[tokio::test]
async fn test_search_fatal_status_surfaces_immediately() {
    let primary = mirror(404, 1).await;
    let fallback = mirror(200, 0).await;

    let (status, body) =
        get_json(search_router(&[&primary, &fallback]), "/api/search?q=foo").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "search api 404");
}

#[tokio::test]
async fn test_search_clamps_limit_and_offset() {
    let server = MockServer::start().await;
    Mock::given(path(SEARCH_PATH))
        .and(query_param("_limit", "50"))
        .and(query_param("_offset", "0"))
        .and(query_param("_sort", "-commentCounter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(
        search_router(&[&server]),
        "/api/search?q=foo&limit=999&offset=-5&sort=comments",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nextOffset"], 3);
}

#[tokio::test]
async fn test_search_repeated_keys_use_first_value() {
    let server = MockServer::start().await;
    Mock::given(path(SEARCH_PATH))
        .and(query_param("q", "foo"))
        .and(query_param("_limit", "5"))
        .and(query_param("_sort", "-startTime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(
        search_router(&[&server]),
        "/api/search?q=foo&q=bar&limit=5&limit=6&sort=new&sort=comments",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_unknown_sort_uses_popular() {
    let server = MockServer::start().await;
    Mock::given(path(SEARCH_PATH))
        .and(query_param("_sort", "-viewCounter"))
        .and(query_param("_limit", "24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) =
        get_json(search_router(&[&server]), "/api/search?q=foo&sort=shuffle").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], 0);
    assert_eq!(body["nextOffset"], 0);
}

// ---------------------------------------------------------------------------
// /api/diag/:id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_diag_bad_id() {
    let watch_api = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&watch_api)
        .await;

    let app = create_test_router(vec![], watch_api.uri(), PathBuf::from("does-not-exist"));
    let (status, body) = get_json(app, "/api/diag/not-an-id").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": false, "error": "bad id" }));
}

#[tokio::test]
async fn test_diag_echoes_upstream() {
    let watch_api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/watch/v3_guest/sm9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(1200)))
        .expect(1)
        .mount(&watch_api)
        .await;

    let app = create_test_router(vec![], watch_api.uri(), PathBuf::from("does-not-exist"));
    let (status, body) = get_json(app, "/api/diag/sm9").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["status"], 200);
    assert_eq!(body["sample"].as_str().unwrap().len(), 500);
}

#[tokio::test]
async fn test_diag_upstream_error_is_still_200() {
    let watch_api = MockServer::start().await;
    Mock::given(path("/api/watch/v3_guest/sm1"))
        .respond_with(ResponseTemplate::new(400).set_body_string("{\"meta\":{\"status\":400}}"))
        .expect(1)
        .mount(&watch_api)
        .await;

    let app = create_test_router(vec![], watch_api.uri(), PathBuf::from("does-not-exist"));
    let (status, body) = get_json(app, "/api/diag/sm1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], false);
    assert_eq!(body["status"], 400);
    assert_eq!(body["sample"], "{\"meta\":{\"status\":400}}");
}

#[tokio::test]
async fn test_diag_network_error() {
    let (status, body) = get_json(offline_router(), "/api/diag/sm9").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().starts_with("HTTP request failed"));
}

// ---------------------------------------------------------------------------
// Static files
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_static_file_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("hello.txt"), "hello from public").unwrap();

    let app = create_test_router(
        vec![],
        "http://127.0.0.1:1".to_string(),
        dir.path().to_path_buf(),
    );
    let (status, body) = get(app, "/hello.txt").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"hello from public");
}

#[tokio::test]
async fn test_static_missing_file_is_404() {
    let dir = tempfile::tempdir().unwrap();

    let app = create_test_router(
        vec![],
        "http://127.0.0.1:1".to_string(),
        dir.path().to_path_buf(),
    );
    let (status, _) = get(app, "/nope.html").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bundled_front_end_builds_results_without_markup() {
    let public_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../public");

    let app = create_test_router(vec![], "http://127.0.0.1:1".to_string(), public_dir);
    let (status, body) = get(app, "/index.html").await;

    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("/api/search"));
    // Upstream strings only reach the DOM through properties, never markup.
    assert!(!page.contains("innerHTML"));
    assert!(page.contains("img.src = item.thumbnailUrl"));
    assert!(page.contains("title.textContent"));
}
