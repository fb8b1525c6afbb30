//! Background detail enrichment for the selected article.
//!
//! Selections are debounced and only the most recent one is ever fetched:
//! a new selection cancels whatever the previous one left pending or in
//! flight. Results land in the shared [`DetailStore`](crate::store::DetailStore)
//! and are announced through [`EnrichEvent`]s.

mod supervisor;

pub use supervisor::{spawn_detail_supervisor, DetailSupervisor};

use tokio::sync::mpsc;
use tracing::warn;

/// Message type for the detail supervisor
#[derive(Debug)]
pub enum EnrichMessage {
    /// The article with this ID became the current selection
    Select(String),
    /// The selection moved to something without an ID
    Clear,
    /// Cancel pending work and stop
    Shutdown,
}

/// Progress reports from the detail supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichEvent {
    /// The debounce elapsed and the request was sent
    Started(String),
    /// Details are now in the store
    Loaded(String),
    /// The provider had nothing usable for this ID
    NotFound(String),
    /// Transport failure, already logged
    Failed { id: String, message: String },
}

impl EnrichEvent {
    pub fn id(&self) -> &str {
        match self {
            EnrichEvent::Started(id) | EnrichEvent::Loaded(id) | EnrichEvent::NotFound(id) => id,
            EnrichEvent::Failed { id, .. } => id,
        }
    }
}

/// Handle to send messages to the detail supervisor
#[derive(Clone)]
pub struct EnrichHandle {
    tx: mpsc::Sender<EnrichMessage>,
}

impl EnrichHandle {
    /// Report the new selection. An empty ID clears the slot.
    pub async fn select(&self, id: &str) {
        let msg = if id.is_empty() {
            EnrichMessage::Clear
        } else {
            EnrichMessage::Select(id.to_string())
        };
        if let Err(e) = self.tx.send(msg).await {
            warn!("Failed to queue article for enrichment: {}", e);
        }
    }

    /// Drop whatever the previous selection left pending.
    pub async fn clear(&self) {
        if let Err(e) = self.tx.send(EnrichMessage::Clear).await {
            warn!("Failed to clear enrichment selection: {}", e);
        }
    }

    pub async fn shutdown(&self) {
        let _ = self.tx.send(EnrichMessage::Shutdown).await;
    }
}
