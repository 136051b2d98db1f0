use media_track_sources::CatalogRegistry;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::controller::{SearchOutcome, SearchRequest};

/// Runs catalog searches on the tokio runtime, one at a time.
///
/// Dispatching a new search aborts the previous task. Outcomes arrive on the
/// receiver returned by [`SearchDispatcher::new`]; the controller still
/// checks their sequence number since an outcome may already be queued.
pub struct SearchDispatcher {
    registry: Arc<CatalogRegistry>,
    tx: mpsc::UnboundedSender<SearchOutcome>,
    in_flight: Option<JoinHandle<()>>,
}

impl SearchDispatcher {
    pub fn new(registry: Arc<CatalogRegistry>) -> (Self, mpsc::UnboundedReceiver<SearchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            registry,
            tx,
            in_flight: None,
        };
        (dispatcher, rx)
    }

    pub fn dispatch(&mut self, request: SearchRequest) {
        self.cancel();

        let registry = self.registry.clone();
        let tx = self.tx.clone();
        debug!(seq = request.seq, query = %request.query, mode = %request.mode, "Dispatching search");

        self.in_flight = Some(tokio::spawn(async move {
            let results = registry.search_or_empty(&request.query, request.mode).await;
            // Receiver gone means the UI has shut down
            let _ = tx.send(SearchOutcome {
                seq: request.seq,
                results,
            });
        }));
    }

    /// Aborts the in-flight search, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!("Aborting in-flight search");
            }
            handle.abort();
        }
    }
}

impl Drop for SearchDispatcher {
    fn drop(&mut self) {
        self.cancel();
    }
}
