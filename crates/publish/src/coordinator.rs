//! Publish coordination.
//!
//! Each partition runs as an independent task: mutation, then (only when the
//! mutation completed) a refetch of the matching collection. Neither task
//! waits for, or rolls back, the other.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::Instrument;

use merchdesk_catalog::EntityKind;
use merchdesk_infra::{MutationError, MutationResponse, PublishDispatcher, Refetch, SourceError};
use merchdesk_view::RowRef;

use crate::partition::Partition;

/// How one partition's mutation + refetch ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PartitionOutcome {
    /// Mutation completed and the collection was refetched.
    Refreshed(MutationResponse),
    /// Mutation completed but the follow-up refetch failed.
    RefreshFailed {
        response: MutationResponse,
        error: SourceError,
    },
    /// Mutation failed; no refetch was attempted.
    MutationFailed(MutationError),
    /// The task panicked or was aborted before finishing.
    Aborted(String),
}

impl PartitionOutcome {
    pub fn refreshed(&self) -> bool {
        matches!(self, PartitionOutcome::Refreshed(_))
    }
}

/// Handles to the tasks spawned for one bulk action.
///
/// `None` means the partition was empty and no mutation was issued.
#[derive(Debug)]
pub struct PublishTasks {
    pub products: Option<JoinHandle<PartitionOutcome>>,
    pub inventory: Option<JoinHandle<PartitionOutcome>>,
}

/// Settled outcomes of both partitions.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReport {
    pub products: Option<PartitionOutcome>,
    pub inventory: Option<PartitionOutcome>,
}

impl PublishTasks {
    pub fn none() -> Self {
        Self {
            products: None,
            inventory: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_none() && self.inventory.is_none()
    }

    /// Wait for whichever tasks were spawned.
    pub async fn settle(self) -> PublishReport {
        PublishReport {
            products: settle_one(self.products).await,
            inventory: settle_one(self.inventory).await,
        }
    }
}

async fn settle_one(handle: Option<JoinHandle<PartitionOutcome>>) -> Option<PartitionOutcome> {
    let handle = handle?;
    Some(match handle.await {
        Ok(outcome) => outcome,
        Err(err) => PartitionOutcome::Aborted(err.to_string()),
    })
}

/// Drives bulk publish-state changes against the mutation collaborator.
#[derive(Clone)]
pub struct PublishCoordinator {
    dispatcher: Arc<dyn PublishDispatcher>,
    products: Arc<dyn Refetch>,
    inventory: Arc<dyn Refetch>,
}

impl core::fmt::Debug for PublishCoordinator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublishCoordinator").finish_non_exhaustive()
    }
}

impl PublishCoordinator {
    pub fn new(
        dispatcher: Arc<dyn PublishDispatcher>,
        products: Arc<dyn Refetch>,
        inventory: Arc<dyn Refetch>,
    ) -> Self {
        Self {
            dispatcher,
            products,
            inventory,
        }
    }

    /// Set `published` on every selected entity.
    ///
    /// Issues at most one batched mutation per entity kind and returns
    /// immediately; must be called from within a Tokio runtime.
    pub fn set_publish_state(&self, selection: &[RowRef], published: bool) -> PublishTasks {
        let partition = Partition::from_selection(selection);
        tracing::info!(
            products = partition.product_ids.len(),
            inventory = partition.inventory_ids.len(),
            published,
            "bulk publish-state change"
        );

        PublishTasks {
            inventory: self.spawn_partition(EntityKind::Inventory, partition.inventory_ids, published),
            products: self.spawn_partition(EntityKind::Product, partition.product_ids, published),
        }
    }

    fn spawn_partition(
        &self,
        kind: EntityKind,
        ids: Vec<String>,
        published: bool,
    ) -> Option<JoinHandle<PartitionOutcome>> {
        if ids.is_empty() {
            return None;
        }
        let refetch = match kind {
            EntityKind::Product => self.products.clone(),
            EntityKind::Inventory => self.inventory.clone(),
        };
        let span = tracing::info_span!("publish_partition", %kind, ids = ids.len(), published);
        let task = run_partition(self.dispatcher.clone(), refetch, kind, ids, published);
        Some(tokio::spawn(task.instrument(span)))
    }
}

async fn run_partition(
    dispatcher: Arc<dyn PublishDispatcher>,
    refetch: Arc<dyn Refetch>,
    kind: EntityKind,
    ids: Vec<String>,
    published: bool,
) -> PartitionOutcome {
    let result = match kind {
        EntityKind::Product => dispatcher.update_product_publish(ids, published).await,
        EntityKind::Inventory => dispatcher.update_inventory_publish(ids, published).await,
    };

    let response = match result {
        Ok(response) => response,
        Err(error) => {
            tracing::warn!(%error, "publish mutation failed; skipping refetch");
            return PartitionOutcome::MutationFailed(error);
        }
    };

    if response.success {
        tracing::info!(message = %response.message, "publish mutation completed");
    } else {
        tracing::warn!(message = %response.message, "publish mutation completed without success");
    }

    match refetch.refetch().await {
        Ok(()) => PartitionOutcome::Refreshed(response),
        Err(error) => PartitionOutcome::RefreshFailed { response, error },
    }
}
