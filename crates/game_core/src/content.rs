//! Thumbnail filtering and bounded retry on top of a [`ContentProvider`].

use std::{collections::HashSet, sync::Arc};

use shared::domain::ContentItem;
use tracing::{debug, info, warn};

use crate::{config::Settings, ContentProvider};

pub const DEFAULT_RANDOM_SAMPLE_SIZE: usize = 24;
pub const DEFAULT_MAX_RANDOM_ATTEMPTS: usize = 5;
/// MediaWiki caps `grnlimit` at 500 for anonymous clients.
pub const MAX_RANDOM_REQUEST_SIZE: usize = 500;

#[derive(Clone)]
pub struct ContentAdapter {
    provider: Arc<dyn ContentProvider>,
    sample_size: usize,
    max_attempts: usize,
}

impl ContentAdapter {
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            provider,
            sample_size: DEFAULT_RANDOM_SAMPLE_SIZE,
            max_attempts: DEFAULT_MAX_RANDOM_ATTEMPTS,
        }
    }

    pub fn from_settings(provider: Arc<dyn ContentProvider>, settings: &Settings) -> Self {
        Self::new(provider).with_limits(settings.random_sample_size, settings.max_random_attempts)
    }

    pub fn with_limits(mut self, sample_size: usize, max_attempts: usize) -> Self {
        self.sample_size = sample_size.max(1);
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Up to `count` thumbnail-bearing random items, in source order across
    /// batches. Requests more batches until the quota is met or the attempt
    /// bound is reached; a failed request ends the loop early.
    pub async fn fetch_random_batch(&self, count: usize) -> Vec<ContentItem> {
        if count == 0 {
            return Vec::new();
        }

        let request_size = self.sample_size.max(count).min(MAX_RANDOM_REQUEST_SIZE);
        let mut accepted: Vec<ContentItem> = Vec::with_capacity(count.min(request_size));
        let mut seen = HashSet::new();

        for attempt in 1..=self.max_attempts {
            let batch = match self.provider.random_batch(request_size).await {
                Ok(batch) => batch,
                Err(err) => {
                    warn!(attempt, code = ?err.code(), "random content request failed: {err}");
                    return accepted;
                }
            };

            let received = batch.len();
            let before = accepted.len();
            for item in batch.into_iter().filter(ContentItem::has_thumbnail) {
                if accepted.len() == count {
                    break;
                }
                if seen.insert(item.id) {
                    accepted.push(item);
                }
            }
            debug!(
                attempt,
                received,
                kept = accepted.len() - before,
                total = accepted.len(),
                "filtered random batch"
            );

            if accepted.len() == count {
                return accepted;
            }
        }

        info!(
            wanted = count,
            got = accepted.len(),
            attempts = self.max_attempts,
            "random content quota not met"
        );
        accepted
    }

    /// Every thumbnail-bearing match for `query`, best match first. A blank
    /// query matches nothing.
    pub async fn search_content(&self, query: &str) -> Vec<ContentItem> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match self.provider.search(query).await {
            Ok(items) => {
                let matches: Vec<_> = items.into_iter().filter(ContentItem::has_thumbnail).collect();
                debug!(query, matches = matches.len(), "search complete");
                matches
            }
            Err(err) => {
                warn!(query, code = ?err.code(), "content search failed: {err}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/content_tests.rs"]
mod tests;
