use super::*;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct ApiState {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn handle_api(
    State(state): State<ApiState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.seen.lock().await.push(params);
    (state.status, state.body.clone())
}

async fn spawn_api(
    status: StatusCode,
    body: &str,
) -> anyhow::Result<(Settings, Arc<Mutex<Vec<HashMap<String, String>>>>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = ApiState {
        status,
        body: body.to_string(),
        seen: Arc::clone(&seen),
    };
    let app = Router::new()
        .route("/w/api.php", get(handle_api))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    let settings = Settings {
        api_url: format!("http://{addr}/w/api.php"),
        request_timeout_ms: 2_000,
        ..Settings::default()
    };
    Ok((settings, seen))
}

const RANDOM_BODY: &str = r#"{
  "batchcomplete": true,
  "query": {
    "pages": [
      {"pageid": 101, "ns": 0, "title": "Teapot", "thumbnail": {"source": "https://upload.example/teapot.jpg", "width": 200, "height": 150}},
      {"pageid": 102, "ns": 0, "title": "Obscure hamlet"},
      {"pageid": 103, "ns": 0, "title": "Lighthouse", "thumbnail": {"source": "https://upload.example/lighthouse.jpg", "width": 150, "height": 200}}
    ]
  }
}"#;

const SEARCH_BODY: &str = r#"{
  "query": {
    "pages": [
      {"pageid": 7, "title": "Third hit", "index": 3, "thumbnail": {"source": "https://upload.example/3.jpg"}},
      {"pageid": 900, "title": "First hit", "index": 1, "thumbnail": {"source": "https://upload.example/1.jpg"}},
      {"pageid": 55, "title": "Second hit", "index": 2}
    ]
  }
}"#;

#[test]
fn parses_pages_in_source_order_without_rank() {
    let items = parse_query_response(RANDOM_BODY).expect("parse");
    let titles: Vec<_> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["Teapot", "Obscure hamlet", "Lighthouse"]);
    assert_eq!(items[1].thumbnail_url, None);
    assert_eq!(
        items[2].thumbnail_url.as_deref(),
        Some("https://upload.example/lighthouse.jpg")
    );
}

#[test]
fn orders_search_pages_by_rank() {
    let items = parse_query_response(SEARCH_BODY).expect("parse");
    let ids: Vec<_> = items.iter().map(|item| item.id.0).collect();
    assert_eq!(ids, vec![900, 55, 7]);
}

#[test]
fn response_without_query_is_empty() {
    let items = parse_query_response(r#"{"batchcomplete": true}"#).expect("parse");
    assert!(items.is_empty());
}

#[test]
fn pages_without_ids_are_skipped() {
    let items = parse_query_response(
        r#"{"query": {"pages": [{"title": "Ghost", "missing": true}, {"pageid": 1, "title": "Real"}]}}"#,
    )
    .expect("parse");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Real");
}

#[test]
fn garbage_is_malformed() {
    let err = parse_query_response("<html>rate limited</html>").expect_err("garbage");
    assert!(matches!(err, ContentError::Malformed(_)));
}

#[test]
fn api_error_object_is_a_transport_failure() {
    let err = parse_query_response(r#"{"error": {"code": "maxlag", "info": "Waiting for a database server"}}"#)
        .expect_err("api error");
    assert!(matches!(err, ContentError::Transport(message) if message.contains("maxlag")));
}

#[test]
fn article_links_use_curid() {
    let base = Url::parse("https://en.wikipedia.org/").expect("url");
    assert_eq!(
        article_href(&base, PageId(42)),
        "https://en.wikipedia.org/?curid=42"
    );
}

#[tokio::test]
async fn random_batch_sends_random_generator_query() {
    let (settings, seen) = spawn_api(StatusCode::OK, RANDOM_BODY)
        .await
        .expect("spawn api");
    let provider = WikipediaProvider::new(&settings).expect("provider");

    let items = provider.random_batch(24).await.expect("random batch");
    assert_eq!(items.len(), 3);

    let seen = seen.lock().await;
    let params = seen.first().expect("one request");
    assert_eq!(params.get("generator").map(String::as_str), Some("random"));
    assert_eq!(params.get("grnlimit").map(String::as_str), Some("24"));
    assert_eq!(params.get("grnnamespace").map(String::as_str), Some("0"));
    assert_eq!(params.get("pithumbsize").map(String::as_str), Some("200"));
    assert_eq!(params.get("formatversion").map(String::as_str), Some("2"));
    assert_eq!(params.get("prop").map(String::as_str), Some("pageimages"));
}

#[tokio::test]
async fn search_sends_query_text() {
    let (settings, seen) = spawn_api(StatusCode::OK, SEARCH_BODY)
        .await
        .expect("spawn api");
    let provider = WikipediaProvider::new(&settings).expect("provider");

    let items = provider.search("tea & toast").await.expect("search");
    assert_eq!(items[0].title, "First hit");

    let seen = seen.lock().await;
    let params = seen.first().expect("one request");
    assert_eq!(params.get("generator").map(String::as_str), Some("search"));
    assert_eq!(params.get("gsrsearch").map(String::as_str), Some("tea & toast"));
}

#[tokio::test]
async fn http_error_status_is_a_transport_failure() {
    let (settings, _) = spawn_api(StatusCode::SERVICE_UNAVAILABLE, "busy")
        .await
        .expect("spawn api");
    let provider = WikipediaProvider::new(&settings).expect("provider");

    let err = provider.search("anything").await.expect_err("503");
    assert!(matches!(err, ContentError::Transport(_)));
}

#[tokio::test]
async fn unreachable_api_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let settings = Settings {
        api_url: format!("http://{addr}/w/api.php"),
        request_timeout_ms: 2_000,
        ..Settings::default()
    };
    let provider = WikipediaProvider::new(&settings).expect("provider");

    let err = provider.random_batch(4).await.expect_err("connection refused");
    assert!(matches!(err, ContentError::Transport(_)));
}

#[test]
fn rejects_invalid_api_url() {
    let settings = Settings {
        api_url: "::not a url::".into(),
        ..Settings::default()
    };
    assert!(WikipediaProvider::new(&settings).is_err());
}
