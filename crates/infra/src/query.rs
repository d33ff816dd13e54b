//! Cache-and-network collection queries.
//!
//! A [`CollectionQuery`] keeps the last resolved snapshot of one collection
//! and always goes back to the source on `fetch`/`refetch`. While a request is
//! in flight the previous data stays visible with `loading` set; a failed
//! request records the error next to the stale data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::sync::watch;

use merchdesk_view::QueryState;

use crate::error::SourceError;
use crate::source::CollectionFetcher;

/// Re-run a query against its source.
#[async_trait]
pub trait Refetch: Send + Sync {
    async fn refetch(&self) -> Result<(), SourceError>;
}

#[derive(Debug)]
struct Slot<T> {
    state: QueryState<T>,
    /// Request sequence number of the response currently in `state`.
    applied: u64,
}

pub struct CollectionQuery<T> {
    name: &'static str,
    fetcher: Arc<dyn CollectionFetcher<T>>,
    filter: Option<JsonValue>,
    slot: RwLock<Slot<T>>,
    issued: AtomicU64,
    changed: watch::Sender<u64>,
}

impl<T> core::fmt::Debug for CollectionQuery<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CollectionQuery")
            .field("name", &self.name)
            .field("filter", &self.filter)
            .field("issued", &self.issued.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl<T> CollectionQuery<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str, fetcher: Arc<dyn CollectionFetcher<T>>) -> Self {
        let (changed, _) = watch::channel(0);
        Self {
            name,
            fetcher,
            filter: None,
            slot: RwLock::new(Slot {
                state: QueryState::pending(),
                applied: 0,
            }),
            issued: AtomicU64::new(0),
            changed,
        }
    }

    pub fn with_filter(mut self, filter: JsonValue) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current snapshot (cloned; never blocks on the network).
    pub fn snapshot(&self) -> QueryState<T> {
        match self.slot.read() {
            Ok(slot) => slot.state.clone(),
            Err(_) => QueryState::failed(format!("{} query state poisoned", self.name)),
        }
    }

    /// Receiver that ticks every time the snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changed.subscribe()
    }

    /// Fetch from the source and store the outcome.
    ///
    /// A response that arrives after a newer one has already been applied is
    /// discarded and reported as `Ok`, so overlapping requests settle on the
    /// latest. `loading` stays set while any newer request is outstanding.
    pub async fn fetch(&self) -> Result<(), SourceError> {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.update(|slot| slot.state.loading = true);

        let result = self.fetcher.fetch(self.filter.clone()).await;

        let applied = self
            .update(|slot| {
                if seq < slot.applied {
                    tracing::debug!(query = self.name, seq, applied = slot.applied, "discarding stale response");
                    return false;
                }
                slot.applied = seq;
                slot.state.loading = seq < self.issued.load(Ordering::SeqCst);
                match &result {
                    Ok(items) => {
                        slot.state.data = Some(items.clone());
                        slot.state.error = None;
                    }
                    Err(err) => {
                        slot.state.error = Some(err.to_string());
                    }
                }
                true
            })
            .unwrap_or(true);

        match result {
            Err(err) if applied => {
                tracing::warn!(query = self.name, error = %err, "collection fetch failed");
                Err(err)
            }
            Err(err) => {
                tracing::debug!(query = self.name, error = %err, "superseded fetch failed");
                Ok(())
            }
            Ok(_) => Ok(()),
        }
    }

    /// Apply `f` to the slot and tick subscribers. `None` if the lock is poisoned.
    fn update<R>(&self, f: impl FnOnce(&mut Slot<T>) -> R) -> Option<R> {
        let out = self.slot.write().ok().map(|mut slot| f(&mut slot));
        self.changed.send_modify(|rev| *rev += 1);
        out
    }
}

#[async_trait]
impl<T> Refetch for CollectionQuery<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn refetch(&self) -> Result<(), SourceError> {
        tracing::debug!(query = self.name, "refetching");
        self.fetch().await
    }
}
