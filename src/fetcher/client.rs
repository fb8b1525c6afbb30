use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::app::{PublicoError, Result};
use crate::domain::Article;
use crate::fetcher::{FetchResult, Fetcher};

/// Characters of a bad payload kept in the parse-failure log line.
const LOG_SNIPPET_CHARS: usize = 200;

/// Which article list to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArticleSource {
    Latest,
    Top,
    Search(String),
}

impl ArticleSource {
    pub fn label(&self) -> String {
        match self {
            ArticleSource::Latest => "Latest".to_string(),
            ArticleSource::Top => "Top".to_string(),
            ArticleSource::Search(query) => format!("Search: {}", query),
        }
    }
}

/// The provider's news endpoints, with response-shape guards applied.
pub struct PublicoClient {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    base_url: String,
}

impl PublicoClient {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn latest(&self) -> Result<Vec<Article>> {
        self.get_list(&self.endpoint("list/ultimas")).await
    }

    pub async fn top(&self) -> Result<Vec<Article>> {
        self.get_list(&self.endpoint("list/destaque")).await
    }

    pub async fn articles(&self, source: &ArticleSource) -> Result<Vec<Article>> {
        match source {
            ArticleSource::Latest => self.latest().await,
            ArticleSource::Top => self.top().await,
            ArticleSource::Search(query) => self.search(query).await,
        }
    }

    /// Full-text search. A blank query short-circuits to an empty list.
    pub async fn search(&self, query: &str) -> Result<Vec<Article>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}?query={}",
            self.endpoint("list/search"),
            urlencoding::encode(query)
        );
        self.get_list(&url).await
    }

    /// Fetch one article's full record.
    ///
    /// An empty body, malformed JSON or a non-object payload all mean
    /// "not found" and resolve to `Ok(None)`. Transport failures and
    /// cancellation are returned as errors.
    pub async fn detail(
        &self,
        id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Option<Article>> {
        if id.is_empty() {
            return Err(PublicoError::MissingArticleId);
        }

        let url = self.endpoint(&format!("content/news/{}", id));
        let body = match self.fetcher.fetch(&url, cancel).await {
            Ok(FetchResult::Content(body)) => body,
            Ok(FetchResult::Empty) => {
                tracing::info!(article_id = %id, "Empty response for article details");
                return Ok(None);
            }
            Err(e) if e.is_cancelled() => {
                tracing::debug!(article_id = %id, "Article detail request cancelled");
                return Err(e);
            }
            Err(e) => {
                tracing::error!(article_id = %id, error = %e, "Failed to fetch article details");
                return Err(e);
            }
        };

        let value: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(e) => {
                let snippet: String = body.chars().take(LOG_SNIPPET_CHARS).collect();
                tracing::error!(
                    article_id = %id,
                    error = %e,
                    body = %snippet,
                    "Failed to parse article details"
                );
                return Ok(None);
            }
        };

        let article = Article::from_value(&value);
        if article.is_none() {
            tracing::info!(article_id = %id, "Article details payload is not an object");
        }
        Ok(article)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_list(&self, url: &str) -> Result<Vec<Article>> {
        tracing::debug!(%url, "Fetching article list");

        let body = match self.fetcher.fetch(url, None).await? {
            FetchResult::Content(body) => body,
            FetchResult::Empty => {
                return Err(PublicoError::Decode(format!("empty response from {}", url)));
            }
        };

        let value: Value =
            serde_json::from_str(&body).map_err(|e| PublicoError::Decode(e.to_string()))?;
        if !value.is_array() {
            tracing::warn!(%url, "List response is not an array");
        }
        Ok(Article::list_from_value(&value))
    }
}
