use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{NewsletterError, Result};

pub const PAGE_SIZE: usize = 5;
pub const DEFAULT_QUERY: &str = "AI and Data Analytics";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsArticle {
    pub title: String,
    pub source_name: String,
    pub published_at: String,
    pub description: String,
    pub url: String,
}

/// Recent-news search used to ground a newsletter topic.
#[async_trait]
pub trait NewsLookup: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<NewsArticle>>;
}

// NewsAPI `/v2/everything` response
#[derive(Debug, Clone, Deserialize)]
struct EverythingResponse {
    articles: Vec<ApiArticle>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiArticle {
    title: String,
    source: ApiSource,
    published_at: String,
    description: String,
    url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiSource {
    name: String,
}

impl From<ApiArticle> for NewsArticle {
    fn from(article: ApiArticle) -> Self {
        Self {
            title: article.title,
            source_name: article.source.name,
            published_at: article.published_at,
            description: article.description,
            url: article.url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsApiClient {
    /// A missing key is not an error here; searches report it when attempted.
    pub fn new(api_key: Option<&str>, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                NewsletterError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key: api_key.map(|k| k.to_string()),
            base_url: base_url.to_string(),
        })
    }

    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl NewsLookup for NewsApiClient {
    async fn search(&self, query: &str) -> Result<Vec<NewsArticle>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            NewsletterError::Configuration(
                "NEWS_API_KEY is not set; news search is unavailable".to_string(),
            )
        })?;

        let page_size = PAGE_SIZE.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("apiKey", api_key),
            ])
            .send()
            .await
            .map_err(|e| {
                NewsletterError::NewsLookupFailed(format!("failed to reach news API: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsletterError::NewsLookupFailed(format!(
                "news API error ({}): {}",
                status, body
            )));
        }

        let api_response: EverythingResponse = response.json().await.map_err(|e| {
            NewsletterError::NewsLookupFailed(format!("failed to parse news API response: {}", e))
        })?;

        Ok(api_response
            .articles
            .into_iter()
            .take(PAGE_SIZE)
            .map(NewsArticle::from)
            .collect())
    }
}
