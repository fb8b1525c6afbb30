use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::app::{PublicoError, Result};
use crate::config::ApiConfig;
use crate::fetcher::{FetchResult, Fetcher};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<FetchResult> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(PublicoError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(FetchResult::from_body(body))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, cancel: Option<&CancellationToken>) -> Result<FetchResult> {
        let Some(token) = cancel else {
            return self.get(url).await;
        };

        if token.is_cancelled() {
            return Err(PublicoError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => Err(PublicoError::Cancelled),
            result = self.get(url) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_detects_empty() {
        assert_eq!(FetchResult::from_body(String::new()), FetchResult::Empty);
        assert_eq!(FetchResult::from_body(" \n\t".into()), FetchResult::Empty);
        assert_eq!(
            FetchResult::from_body("{}".into()),
            FetchResult::Content("{}".into())
        );
    }

    #[tokio::test]
    async fn test_precancelled_token_short_circuits() {
        let fetcher = HttpFetcher::new(&ApiConfig::default()).unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let result = fetcher.fetch("http://127.0.0.1:9/never", Some(&token)).await;
        assert!(matches!(result, Err(PublicoError::Cancelled)));
    }
}
