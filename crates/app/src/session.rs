//! One inventory page instance.
//!
//! Owns the two collection queries, the selection state and the publish
//! coordinator. The selection lives only as long as the session and is not
//! re-validated against refreshed data.

use std::sync::Arc;

use merchdesk_catalog::{InventoryRecord, Product};
use merchdesk_infra::{
    CatalogSource, CollectionFetcher, CollectionQuery, PublishDispatcher, SourceError,
};
use merchdesk_publish::{PublishCoordinator, PublishTasks};
use merchdesk_view::{
    PanelTransition, Row, RowRef, SelectionState, SortSpec, ViewModel, derive_view_with,
    merge_sources,
};

pub struct InventorySession {
    products: Arc<CollectionQuery<Product>>,
    inventory: Arc<CollectionQuery<InventoryRecord>>,
    coordinator: PublishCoordinator,
    selection: SelectionState,
    sort: Option<SortSpec>,
}

impl InventorySession {
    /// Session over a backend that serves both queries and both mutations.
    pub fn new<C>(catalog: Arc<C>) -> Self
    where
        C: CatalogSource + PublishDispatcher + 'static,
    {
        Self::from_parts(catalog.clone(), catalog.clone(), catalog)
    }

    pub fn from_parts(
        products: Arc<dyn CollectionFetcher<Product>>,
        inventory: Arc<dyn CollectionFetcher<InventoryRecord>>,
        dispatcher: Arc<dyn PublishDispatcher>,
    ) -> Self {
        let products = Arc::new(CollectionQuery::new("products", products));
        let inventory = Arc::new(CollectionQuery::new("inventory", inventory));
        let coordinator =
            PublishCoordinator::new(dispatcher, products.clone(), inventory.clone());
        Self {
            products,
            inventory,
            coordinator,
            selection: SelectionState::new(),
            sort: None,
        }
    }

    /// Fetch both collections concurrently.
    ///
    /// Each result is reported separately; a failure leaves the table empty
    /// until a later fetch of that collection succeeds.
    pub async fn load(&self) -> (Result<(), SourceError>, Result<(), SourceError>) {
        tokio::join!(self.products.fetch(), self.inventory.fetch())
    }

    pub fn products_query(&self) -> &Arc<CollectionQuery<Product>> {
        &self.products
    }

    pub fn inventory_query(&self) -> &Arc<CollectionQuery<InventoryRecord>> {
        &self.inventory
    }

    /// Current merged row tree (empty unless both collections are resolved).
    pub fn rows(&self) -> Vec<Row> {
        merge_sources(&self.products.snapshot(), &self.inventory.snapshot())
    }

    pub fn view(&self) -> ViewModel {
        derive_view_with(
            &self.products.snapshot(),
            &self.inventory.snapshot(),
            &self.selection,
            self.sort,
        )
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// Table selection event: the complete new selection.
    pub fn on_selection_changed(&mut self, selection: Vec<RowRef>) -> Option<PanelTransition> {
        let update = self.selection.on_selection_changed(selection);
        self.selection = update.state;
        update.transition
    }

    /// Select rows of the current table by key; unknown keys are ignored.
    pub fn select_keys<S: AsRef<str>>(&mut self, keys: &[S]) -> Option<PanelTransition> {
        let rows = self.rows();
        let selection = keys
            .iter()
            .filter_map(|key| {
                let found = Row::find(&rows, key.as_ref());
                if found.is_none() {
                    tracing::warn!(key = key.as_ref(), "ignoring selection of unknown row");
                }
                found.map(RowRef::from)
            })
            .collect();
        self.on_selection_changed(selection)
    }

    pub fn publish(&self) -> PublishTasks {
        self.set_published(true)
    }

    pub fn unpublish(&self) -> PublishTasks {
        self.set_published(false)
    }

    /// Bulk actions are disabled while the panel is hidden.
    fn set_published(&self, published: bool) -> PublishTasks {
        if !self.selection.panel_visible {
            tracing::debug!(published, "bulk action ignored; selection panel hidden");
            return PublishTasks::none();
        }
        self.coordinator
            .set_publish_state(&self.selection.selection, published)
    }
}
