//! [`ContentProvider`] backed by the MediaWiki action API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{
    domain::{ContentItem, PageId},
    error::ContentError,
};
use tracing::debug;
use url::Url;

use crate::{config::Settings, ContentProvider};

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    query: Option<QueryBody>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<ApiPage>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    #[serde(default)]
    pageid: Option<i64>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    index: Option<i64>,
    #[serde(default)]
    thumbnail: Option<ApiThumbnail>,
}

#[derive(Debug, Deserialize)]
struct ApiThumbnail {
    source: String,
}

/// Turn a `formatversion=2` query response into items, ordered by search
/// rank when the pages carry one. A response without `query` has no pages.
pub fn parse_query_response(body: &str) -> std::result::Result<Vec<ContentItem>, ContentError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|err| ContentError::Malformed(err.to_string()))?;

    if let Some(error) = response.error {
        return Err(ContentError::Transport(format!(
            "api error {}: {}",
            error.code, error.info
        )));
    }

    let Some(query) = response.query else {
        return Ok(Vec::new());
    };

    let mut pages = query.pages;
    pages.sort_by_key(|page| page.index.unwrap_or(i64::MAX));

    Ok(pages
        .into_iter()
        .filter_map(|page| {
            Some(ContentItem {
                id: PageId(page.pageid?),
                title: page.title,
                thumbnail_url: page.thumbnail.map(|thumb| thumb.source),
            })
        })
        .collect())
}

/// Public article link for a page id, e.g. `https://en.wikipedia.org/?curid=42`.
pub fn article_href(article_url: &Url, id: PageId) -> String {
    let mut url = article_url.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("curid", &id.0.to_string());
    url.to_string()
}

pub struct WikipediaProvider {
    http: Client,
    api_url: Url,
    thumbnail_size: u32,
}

impl WikipediaProvider {
    pub fn new(settings: &Settings) -> Result<Self> {
        let api_url = settings.api_url()?;
        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.request_timeout())
            .build()
            .context("failed to build wikipedia http client")?;
        Ok(Self {
            http,
            api_url,
            thumbnail_size: settings.thumbnail_size,
        })
    }

    fn query_url(&self, params: &[(&str, &str)]) -> Url {
        let thumbnail_size = self.thumbnail_size.to_string();
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("formatversion", "2")
            .append_pair("action", "query")
            .append_pair("prop", "pageimages")
            .append_pair("redirects", "1")
            .append_pair("origin", "*")
            .append_pair("pithumbsize", &thumbnail_size)
            .extend_pairs(params);
        url
    }

    async fn run_query(
        &self,
        params: &[(&str, &str)],
    ) -> std::result::Result<Vec<ContentItem>, ContentError> {
        let url = self.query_url(params);
        debug!(%url, "wikipedia query");
        let body = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| ContentError::Transport(err.to_string()))?
            .text()
            .await
            .map_err(|err| ContentError::Transport(err.to_string()))?;
        parse_query_response(&body)
    }
}

#[async_trait]
impl ContentProvider for WikipediaProvider {
    async fn random_batch(
        &self,
        count: usize,
    ) -> std::result::Result<Vec<ContentItem>, ContentError> {
        let limit = count.to_string();
        self.run_query(&[
            ("generator", "random"),
            ("grnnamespace", "0"),
            ("grnlimit", &limit),
        ])
        .await
    }

    async fn search(&self, query: &str) -> std::result::Result<Vec<ContentItem>, ContentError> {
        self.run_query(&[("generator", "search"), ("gsrsearch", query)])
            .await
    }
}

#[cfg(test)]
#[path = "tests/wikipedia_tests.rs"]
mod tests;
