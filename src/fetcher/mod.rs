pub mod client;
pub mod http_fetcher;
pub mod parallel;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::app::Result;

pub use client::{ArticleSource, PublicoClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Response body text
    Content(String),
    /// 2xx response with an empty or whitespace-only body
    Empty,
}

impl FetchResult {
    pub fn from_body(body: String) -> Self {
        if body.trim().is_empty() {
            FetchResult::Empty
        } else {
            FetchResult::Content(body)
        }
    }
}

/// Plain `GET`, returning the body text.
///
/// Non-2xx responses are errors. When a cancellation token is supplied and
/// fires before the response completes, the call fails with
/// [`PublicoError::Cancelled`](crate::app::PublicoError::Cancelled).
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str, cancel: Option<&CancellationToken>) -> Result<FetchResult>;
}
