use super::*;
use std::collections::VecDeque;

use async_trait::async_trait;
use shared::{domain::PageId, error::ContentError};
use tokio::sync::Mutex;

type Scripted = std::result::Result<Vec<ContentItem>, ContentError>;

struct ScriptedProvider {
    random: Mutex<VecDeque<Scripted>>,
    search: Mutex<VecDeque<Scripted>>,
    random_requests: Mutex<Vec<usize>>,
    search_queries: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(random: Vec<Scripted>, search: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self {
            random: Mutex::new(random.into()),
            search: Mutex::new(search.into()),
            random_requests: Mutex::new(Vec::new()),
            search_queries: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ContentProvider for ScriptedProvider {
    async fn random_batch(&self, count: usize) -> std::result::Result<Vec<ContentItem>, ContentError> {
        self.random_requests.lock().await.push(count);
        self.random
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn search(&self, query: &str) -> std::result::Result<Vec<ContentItem>, ContentError> {
        self.search_queries.lock().await.push(query.to_string());
        self.search
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn with_thumb(id: i64) -> ContentItem {
    ContentItem {
        id: PageId(id),
        title: format!("Article {id}"),
        thumbnail_url: Some(format!("https://upload.example/{id}.png")),
    }
}

fn bare(id: i64) -> ContentItem {
    ContentItem {
        id: PageId(id),
        title: format!("Bare {id}"),
        thumbnail_url: None,
    }
}

fn ids(items: &[ContentItem]) -> Vec<i64> {
    items.iter().map(|item| item.id.0).collect()
}

#[tokio::test]
async fn random_batch_retries_until_quota_and_keeps_batch_order() {
    let provider = ScriptedProvider::new(
        vec![
            Ok(vec![with_thumb(1), bare(2), with_thumb(3), bare(4)]),
            Ok(vec![with_thumb(10), with_thumb(11), with_thumb(12), with_thumb(13)]),
        ],
        Vec::new(),
    );
    let adapter = ContentAdapter::new(provider.clone());

    let items = adapter.fetch_random_batch(4).await;

    assert_eq!(ids(&items), vec![1, 3, 10, 11]);
    assert!(items.iter().all(ContentItem::has_thumbnail));
    assert_eq!(provider.random_requests.lock().await.len(), 2);
}

#[tokio::test]
async fn random_batch_stops_at_the_attempt_bound() {
    let provider = ScriptedProvider::new(
        (0..10).map(|n| Ok(vec![bare(n)])).collect(),
        Vec::new(),
    );
    let adapter = ContentAdapter::new(provider.clone()).with_limits(24, 3);

    let items = adapter.fetch_random_batch(4).await;

    assert!(items.is_empty());
    assert_eq!(*provider.random_requests.lock().await, vec![24, 24, 24]);
}

#[tokio::test]
async fn random_batch_never_returns_more_than_requested() {
    let provider = ScriptedProvider::new(
        vec![Ok((1..=24).map(with_thumb).collect())],
        Vec::new(),
    );
    let adapter = ContentAdapter::new(provider);

    let items = adapter.fetch_random_batch(1).await;

    assert_eq!(ids(&items), vec![1]);
}

#[tokio::test]
async fn random_batch_skips_repeated_articles() {
    let provider = ScriptedProvider::new(
        vec![
            Ok(vec![with_thumb(1), with_thumb(2)]),
            Ok(vec![with_thumb(2), with_thumb(3)]),
        ],
        Vec::new(),
    );
    let adapter = ContentAdapter::new(provider);

    let items = adapter.fetch_random_batch(3).await;

    assert_eq!(ids(&items), vec![1, 2, 3]);
}

#[tokio::test]
async fn random_batch_degrades_to_partial_result_on_transport_failure() {
    let provider = ScriptedProvider::new(
        vec![
            Ok(vec![with_thumb(5)]),
            Err(ContentError::Transport("connection reset".into())),
            Ok(vec![with_thumb(6), with_thumb(7), with_thumb(8)]),
        ],
        Vec::new(),
    );
    let adapter = ContentAdapter::new(provider.clone());

    let items = adapter.fetch_random_batch(4).await;

    assert_eq!(ids(&items), vec![5]);
    assert_eq!(provider.random_requests.lock().await.len(), 2);
}

#[tokio::test]
async fn random_request_size_covers_large_counts() {
    let provider = ScriptedProvider::new(Vec::new(), Vec::new());
    let adapter = ContentAdapter::new(provider.clone()).with_limits(2, 1);

    adapter.fetch_random_batch(4).await;

    assert_eq!(*provider.random_requests.lock().await, vec![4]);
}

#[tokio::test]
async fn huge_counts_are_capped_instead_of_preallocated() {
    let provider = ScriptedProvider::new(vec![Ok(vec![with_thumb(1)])], Vec::new());
    let adapter = ContentAdapter::new(provider.clone()).with_limits(24, 1);

    let items = adapter.fetch_random_batch(usize::MAX).await;

    assert_eq!(ids(&items), vec![1]);
    assert_eq!(
        *provider.random_requests.lock().await,
        vec![MAX_RANDOM_REQUEST_SIZE]
    );
}

#[tokio::test]
async fn zero_count_does_not_touch_the_provider() {
    let provider = ScriptedProvider::new(Vec::new(), Vec::new());
    let adapter = ContentAdapter::new(provider.clone());

    assert!(adapter.fetch_random_batch(0).await.is_empty());
    assert!(provider.random_requests.lock().await.is_empty());
}

#[tokio::test]
async fn search_keeps_every_thumbnailed_match_in_rank_order() {
    let provider = ScriptedProvider::new(
        Vec::new(),
        vec![Ok(vec![
            with_thumb(9),
            bare(8),
            with_thumb(7),
            with_thumb(6),
            with_thumb(5),
            with_thumb(4),
        ])],
    );
    let adapter = ContentAdapter::new(provider.clone());

    let items = adapter.search_content("  rust  ").await;

    assert_eq!(ids(&items), vec![9, 7, 6, 5, 4]);
    assert_eq!(*provider.search_queries.lock().await, vec!["rust".to_string()]);
}

#[tokio::test]
async fn blank_search_returns_nothing_without_a_request() {
    let provider = ScriptedProvider::new(Vec::new(), Vec::new());
    let adapter = ContentAdapter::new(provider.clone());

    assert!(adapter.search_content("").await.is_empty());
    assert!(adapter.search_content("   ").await.is_empty());
    assert!(provider.search_queries.lock().await.is_empty());
}

#[tokio::test]
async fn failed_search_is_an_empty_result() {
    let provider = ScriptedProvider::new(
        Vec::new(),
        vec![Err(ContentError::Malformed("expected value at line 1".into()))],
    );
    let adapter = ContentAdapter::new(provider);

    assert!(adapter.search_content("anything").await.is_empty());
}
