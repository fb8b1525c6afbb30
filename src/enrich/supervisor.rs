use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::enrich::{EnrichEvent, EnrichHandle, EnrichMessage};
use crate::fetcher::PublicoClient;
use crate::store::DetailStore;

/// The single "latest request" slot.
#[derive(Default)]
struct Slot {
    generation: u64,
    token: Option<CancellationToken>,
}

impl Slot {
    /// Cancel the current request, if any, and claim the slot for a new one.
    fn replace(&mut self) -> (u64, CancellationToken) {
        if let Some(previous) = self.token.take() {
            previous.cancel();
        }
        self.generation += 1;
        let token = CancellationToken::new();
        self.token = Some(token.clone());
        (self.generation, token)
    }

    fn cancel(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

/// Shared state of one detail task.
struct Job<S> {
    id: String,
    generation: u64,
    token: CancellationToken,
    debounce: Duration,
    client: Arc<PublicoClient>,
    store: Arc<S>,
    slot: Arc<Mutex<Slot>>,
    events: mpsc::UnboundedSender<EnrichEvent>,
}

impl<S: DetailStore + Send + Sync + 'static> Job<S> {
    /// Whether this job still owns the slot.
    fn is_current(&self, slot: &Slot) -> bool {
        slot.generation == self.generation && !self.token.is_cancelled()
    }

    fn emit(&self, event: EnrichEvent) {
        let _ = self.events.send(event);
    }

    async fn run(self) {
        tokio::select! {
            _ = self.token.cancelled() => {
                debug!(article_id = %self.id, "Selection superseded before request");
                return;
            }
            _ = tokio::time::sleep(self.debounce) => {}
        }

        if matches!(self.store.contains(&self.id), Ok(true)) {
            return;
        }

        self.emit(EnrichEvent::Started(self.id.clone()));
        let result = self.client.detail(&self.id, Some(&self.token)).await;

        let Ok(slot) = self.slot.lock() else {
            warn!("Enrichment slot lock poisoned");
            return;
        };
        if !self.is_current(&slot) {
            debug!(article_id = %self.id, "Discarding stale article details");
            return;
        }

        match result {
            Ok(Some(article)) => match self.store.insert(&self.id, article) {
                Ok(_) => self.emit(EnrichEvent::Loaded(self.id.clone())),
                Err(e) => {
                    warn!(article_id = %self.id, error = %e, "Failed to store article details");
                    self.emit(EnrichEvent::Failed {
                        id: self.id.clone(),
                        message: e.to_string(),
                    });
                }
            },
            Ok(None) => {
                info!(article_id = %self.id, "No details available");
                self.emit(EnrichEvent::NotFound(self.id.clone()));
            }
            Err(e) if e.is_cancelled() => {
                debug!(article_id = %self.id, "Article detail request cancelled");
            }
            Err(e) => {
                warn!(article_id = %self.id, error = %e, "Failed to enrich article");
                self.emit(EnrichEvent::Failed {
                    id: self.id.clone(),
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Debounced, cancellable loader for the selected article's details.
pub struct DetailSupervisor<S: DetailStore + Send + Sync + 'static> {
    client: Arc<PublicoClient>,
    store: Arc<S>,
    debounce: Duration,
    slot: Arc<Mutex<Slot>>,
    rx: mpsc::Receiver<EnrichMessage>,
    events: mpsc::UnboundedSender<EnrichEvent>,
}

impl<S: DetailStore + Send + Sync + 'static> DetailSupervisor<S> {
    /// Create a supervisor, the handle to drive it and the event stream it reports on.
    pub fn new(
        client: Arc<PublicoClient>,
        store: Arc<S>,
        debounce: Duration,
    ) -> (Self, EnrichHandle, mpsc::UnboundedReceiver<EnrichEvent>) {
        let (tx, rx) = mpsc::channel(100);
        let (events, event_rx) = mpsc::unbounded_channel();
        let supervisor = Self {
            client,
            store,
            debounce,
            slot: Arc::new(Mutex::new(Slot::default())),
            rx,
            events,
        };
        (supervisor, EnrichHandle { tx }, event_rx)
    }

    pub async fn run(mut self) {
        debug!("Detail supervisor started");

        while let Some(msg) = self.rx.recv().await {
            match msg {
                EnrichMessage::Select(id) => self.select(id),
                EnrichMessage::Clear => self.clear(),
                EnrichMessage::Shutdown => {
                    debug!("Detail supervisor shutting down");
                    break;
                }
            }
        }

        if let Ok(mut slot) = self.slot.lock() {
            slot.cancel();
        }
    }

    fn clear(&self) {
        match self.slot.lock() {
            Ok(mut slot) => slot.cancel(),
            Err(_) => warn!("Enrichment slot lock poisoned"),
        }
    }

    fn select(&self, id: String) {
        let Ok(mut slot) = self.slot.lock() else {
            warn!("Enrichment slot lock poisoned");
            return;
        };

        // Every selection supersedes the previous one, cached or not.
        match self.store.contains(&id) {
            Ok(false) => {}
            Ok(true) => {
                slot.cancel();
                return;
            }
            Err(e) => {
                warn!(article_id = %id, error = %e, "Detail store unavailable");
                slot.cancel();
                return;
            }
        }

        let (generation, token) = slot.replace();
        drop(slot);

        let job = Job {
            id,
            generation,
            token,
            debounce: self.debounce,
            client: self.client.clone(),
            store: self.store.clone(),
            slot: self.slot.clone(),
            events: self.events.clone(),
        };
        tokio::spawn(job.run());
    }
}

/// Spawn the detail supervisor as a tokio task
pub fn spawn_detail_supervisor<S: DetailStore + Send + Sync + 'static>(
    client: Arc<PublicoClient>,
    store: Arc<S>,
    debounce: Duration,
) -> (EnrichHandle, mpsc::UnboundedReceiver<EnrichEvent>) {
    let (supervisor, handle, events) = DetailSupervisor::new(client, store, debounce);

    tokio::spawn(async move {
        supervisor.run().await;
    });

    (handle, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{PublicoError, Result};
    use crate::fetcher::{FetchResult, Fetcher};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DEBOUNCE: Duration = Duration::from_millis(30);

    /// Echoes the requested ID after `latency`, honoring cancellation.
    struct SlowFetcher {
        latency: Duration,
        calls: AtomicUsize,
        requested: Mutex<Vec<String>>,
    }

    impl SlowFetcher {
        fn new(latency: Duration) -> Arc<Self> {
            Arc::new(Self {
                latency,
                calls: AtomicUsize::new(0),
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Fetcher for SlowFetcher {
        async fn fetch(&self, url: &str, cancel: Option<&CancellationToken>) -> Result<FetchResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let id = url.rsplit('/').next().unwrap_or_default().to_string();
            self.requested.lock().unwrap().push(id.clone());

            let delay = tokio::time::sleep(self.latency);
            match cancel {
                Some(token) => tokio::select! {
                    _ = token.cancelled() => return Err(PublicoError::Cancelled),
                    _ = delay => {}
                },
                None => delay.await,
            }

            if id == "404" {
                return Ok(FetchResult::Empty);
            }
            Ok(FetchResult::Content(format!(r#"{{"id": {}}}"#, id)))
        }
    }

    fn setup(
        fetcher: Arc<SlowFetcher>,
    ) -> (EnrichHandle, mpsc::UnboundedReceiver<EnrichEvent>, Arc<MemoryStore>) {
        let client = Arc::new(PublicoClient::new(fetcher, "https://api.test"));
        let store = Arc::new(MemoryStore::new());
        let (handle, events) = spawn_detail_supervisor(client, store.clone(), DEBOUNCE);
        (handle, events, store)
    }

    async fn next_final(events: &mut mpsc::UnboundedReceiver<EnrichEvent>) -> EnrichEvent {
        loop {
            let event = tokio::time::timeout(Duration::from_secs(2), events.recv())
                .await
                .expect("timed out waiting for event")
                .expect("event channel closed");
            if !matches!(event, EnrichEvent::Started(_)) {
                return event;
            }
        }
    }

    #[tokio::test]
    async fn test_rapid_selections_coalesce_into_one_fetch() {
        let fetcher = SlowFetcher::new(Duration::from_millis(5));
        let (handle, mut events, store) = setup(fetcher.clone());

        handle.select("1").await;
        handle.select("2").await;
        handle.select("3").await;

        assert_eq!(next_final(&mut events).await, EnrichEvent::Loaded("3".into()));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert!(store.contains("3").unwrap());
        assert!(!store.contains("1").unwrap());
    }

    #[tokio::test]
    async fn test_cached_selection_skips_fetch() {
        let fetcher = SlowFetcher::new(Duration::from_millis(5));
        let (handle, _events, store) = setup(fetcher.clone());
        store.insert("9", Default::default()).unwrap();

        handle.select("9").await;
        tokio::time::sleep(DEBOUNCE * 3).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cached_selection_cancels_pending_fetch() {
        let fetcher = SlowFetcher::new(Duration::from_millis(5));
        let (handle, _events, store) = setup(fetcher.clone());
        store.insert("9", Default::default()).unwrap();

        handle.select("1").await;
        handle.select("9").await;
        tokio::time::sleep(DEBOUNCE * 5).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert!(!store.contains("1").unwrap());
    }

    #[tokio::test]
    async fn test_clear_cancels_pending_fetch() {
        let fetcher = SlowFetcher::new(Duration::from_millis(5));
        let (handle, _events, store) = setup(fetcher.clone());

        handle.select("1").await;
        handle.clear().await;
        tokio::time::sleep(DEBOUNCE * 5).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_cached_selection_cancels_in_flight_fetch() {
        let fetcher = SlowFetcher::new(Duration::from_millis(200));
        let (handle, mut events, store) = setup(fetcher.clone());
        store.insert("9", Default::default()).unwrap();

        handle.select("1").await;
        assert_eq!(events.recv().await, Some(EnrichEvent::Started("1".into())));
        handle.select("9").await;
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert!(!store.contains("1").unwrap());
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_new_selection_cancels_in_flight_fetch() {
        let fetcher = SlowFetcher::new(Duration::from_millis(200));
        let (handle, mut events, store) = setup(fetcher.clone());

        handle.select("1").await;
        assert_eq!(events.recv().await, Some(EnrichEvent::Started("1".into())));

        handle.select("2").await;
        // The cancelled request reports nothing; the next outcome is for "2".
        assert_eq!(next_final(&mut events).await, EnrichEvent::Loaded("2".into()));

        assert_eq!(*fetcher.requested.lock().unwrap(), vec!["1", "2"]);
        assert!(!store.contains("1").unwrap());
        assert!(store.contains("2").unwrap());
    }

    #[tokio::test]
    async fn test_empty_detail_reports_not_found() {
        let fetcher = SlowFetcher::new(Duration::from_millis(1));
        let (handle, mut events, store) = setup(fetcher);

        handle.select("404").await;
        assert_eq!(next_final(&mut events).await, EnrichEvent::NotFound("404".into()));
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_shutdown_cancels_pending_selection() {
        let fetcher = SlowFetcher::new(Duration::from_millis(1));
        let (handle, _events, _store) = setup(fetcher.clone());

        handle.select("1").await;
        handle.shutdown().await;
        tokio::time::sleep(DEBOUNCE * 3).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }
}
