use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::domain::{Article, ArticleView};
use crate::extractor::extract_article_id;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::parallel::{ParallelFetcher, DEFAULT_WORKERS};
use crate::fetcher::{Fetcher, PublicoClient};
use crate::normalizer::Normalizer;
use crate::render::{ArticlePage, DETAILS_UNAVAILABLE_MESSAGE, NO_ARTICLE_ID_MESSAGE};
use crate::store::{DetailStore, MemoryStore};

pub struct AppContext {
    pub config: Config,
    pub client: Arc<PublicoClient>,
    pub store: Arc<MemoryStore>,
    pub parallel_fetcher: ParallelFetcher,
    pub normalizer: Normalizer,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_workers(config, DEFAULT_WORKERS)
    }

    pub fn with_workers(config: Config, workers: usize) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.api)?);
        Ok(Self::with_fetcher(config, fetcher, workers))
    }

    /// Build a context around any [`Fetcher`], e.g. a stub in tests.
    pub fn with_fetcher(
        config: Config,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        workers: usize,
    ) -> Self {
        let client = Arc::new(PublicoClient::new(fetcher, &config.api.base_url));
        let parallel_fetcher = ParallelFetcher::with_workers(client.clone(), workers);
        let normalizer = Normalizer::with_date_format(&config.display.date_format);

        Self {
            config,
            client,
            store: Arc::new(MemoryStore::new()),
            parallel_fetcher,
            normalizer,
        }
    }

    /// Normalize a list entry, merging cached details for its ID if any.
    pub fn view_of(&self, article: &Article) -> ArticleView {
        let base = self.normalizer.normalize(article);
        let overlay = base
            .id
            .as_deref()
            .and_then(|id| self.store.get(id).ok().flatten());

        match overlay {
            Some(details) => self.normalizer.normalize_with_overlay(article, Some(&details)),
            None => base,
        }
    }

    /// Load the full article behind a URL or bare ID.
    pub async fn load_article(&self, url_or_id: &str) -> ArticlePage {
        let Some(id) = extract_article_id(url_or_id) else {
            return ArticlePage::Error(NO_ARTICLE_ID_MESSAGE.to_string());
        };

        match self.client.detail(&id, None).await {
            Ok(Some(article)) => {
                let mut view = self.normalizer.normalize(&article);
                if view.id.is_none() {
                    view.id = Some(id);
                }
                ArticlePage::Ready(view)
            }
            Ok(None) => ArticlePage::Error(DETAILS_UNAVAILABLE_MESSAGE.to_string()),
            Err(e) => ArticlePage::load_error(&e),
        }
    }
}
