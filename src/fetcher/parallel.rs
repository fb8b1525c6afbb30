use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::app::{PublicoError, Result};
use crate::fetcher::PublicoClient;
use crate::store::DetailStore;

pub const DEFAULT_WORKERS: usize = 10;

/// Outcome of enriching one article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    Cached,
    Loaded,
    NotFound,
}

/// Fetches article details for many IDs with a bounded number of requests
/// in flight.
pub struct ParallelFetcher {
    client: Arc<PublicoClient>,
    semaphore: Arc<Semaphore>,
}

impl ParallelFetcher {
    pub fn new(client: Arc<PublicoClient>) -> Self {
        Self::with_workers(client, DEFAULT_WORKERS)
    }

    pub fn with_workers(client: Arc<PublicoClient>, workers: usize) -> Self {
        Self {
            client,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Enrich every ID, skipping those already in the store. Results are
    /// returned in input order.
    pub async fn fetch_all<S: DetailStore + Send + Sync + 'static>(
        &self,
        ids: Vec<String>,
        store: Arc<S>,
    ) -> Vec<(String, Result<DetailOutcome>)> {
        let mut handles = Vec::new();

        for id in ids {
            let client = self.client.clone();
            let semaphore = self.semaphore.clone();
            let store = store.clone();

            let handle = tokio::spawn(async move {
                let result = match semaphore.acquire().await {
                    Ok(_permit) => fetch_single_detail(&client, &id, &store).await,
                    Err(_) => Err(PublicoError::Other("worker pool closed".into())),
                };
                (id, result)
            });

            handles.push(handle);
        }

        join_all(handles)
            .await
            .into_iter()
            .filter_map(|joined| match joined {
                Ok(result) => Some(result),
                Err(e) => {
                    tracing::error!("Task join error: {}", e);
                    None
                }
            })
            .collect()
    }
}

async fn fetch_single_detail<S: DetailStore>(
    client: &PublicoClient,
    id: &str,
    store: &Arc<S>,
) -> Result<DetailOutcome> {
    if store.contains(id)? {
        return Ok(DetailOutcome::Cached);
    }

    match client.detail(id, None).await? {
        Some(article) => {
            store.insert(id, article)?;
            tracing::debug!(article_id = %id, "Stored article details");
            Ok(DetailOutcome::Loaded)
        }
        None => Ok(DetailOutcome::NotFound),
    }
}
