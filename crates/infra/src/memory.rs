//! In-memory catalog for tests/dev.
//!
//! Serves both catalog queries and both publish mutations from two vectors.
//! Fault injection switches let callers make individual operations fail.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value as JsonValue, json};

use merchdesk_catalog::{EntityKind, InventoryRecord, Product};
use merchdesk_core::Entity;

use crate::dispatch::{MutationResponse, PublishDispatcher};
use crate::error::{MutationError, SourceError};
use crate::source::CatalogSource;

/// One recorded publish mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCall {
    pub kind: EntityKind,
    pub ids: Vec<String>,
    pub published: bool,
}

#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
    inventory: RwLock<Vec<InventoryRecord>>,
    calls: Mutex<Vec<PublishCall>>,
    fail_products_query: AtomicBool,
    fail_inventory_query: AtomicBool,
    fail_product_publish: AtomicBool,
    fail_inventory_publish: AtomicBool,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(products: Vec<Product>, inventory: Vec<InventoryRecord>) -> Self {
        Self {
            products: RwLock::new(products),
            inventory: RwLock::new(inventory),
            ..Self::default()
        }
    }

    /// Seed from a fixture document `{ "products": [...], "inventory": [...] }`.
    pub fn from_fixture(fixture: &JsonValue) -> Result<Self, SourceError> {
        let products = decode_field(fixture, "products")?;
        let inventory = decode_field(fixture, "inventory")?;
        Ok(Self::with_data(products, inventory))
    }

    pub fn fail_products_query(&self, fail: bool) {
        self.fail_products_query.store(fail, Ordering::SeqCst);
    }

    pub fn fail_inventory_query(&self, fail: bool) {
        self.fail_inventory_query.store(fail, Ordering::SeqCst);
    }

    pub fn fail_product_publish(&self, fail: bool) {
        self.fail_product_publish.store(fail, Ordering::SeqCst);
    }

    pub fn fail_inventory_publish(&self, fail: bool) {
        self.fail_inventory_publish.store(fail, Ordering::SeqCst);
    }

    /// Publish mutations received so far, failed ones included.
    pub fn publish_calls(&self) -> Vec<PublishCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        find_entity(&self.products.read().ok()?, id)
    }

    pub fn inventory_record(&self, id: &str) -> Option<InventoryRecord> {
        find_entity(&self.inventory.read().ok()?, id)
    }

    fn record_call(&self, kind: EntityKind, ids: &[String], published: bool) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(PublishCall {
                kind,
                ids: ids.to_vec(),
                published,
            });
        }
    }
}

fn find_entity<E>(items: &[E], id: &str) -> Option<E>
where
    E: Entity + Clone,
    E::Id: AsRef<str>,
{
    items.iter().find(|e| e.id().as_ref() == id).cloned()
}

/// Set `published` on every listed entity and stamp `updated_at` via `touch`.
/// Returns how many entities matched.
fn mark_published<E>(items: &mut [E], ids: &[String], published: bool, touch: impl Fn(&mut E)) -> usize
where
    E: Entity,
    E::Id: AsRef<str>,
{
    let mut matched = 0;
    for item in items
        .iter_mut()
        .filter(|e| ids.iter().any(|id| id.as_str() == e.id().as_ref()))
    {
        item.set_published(published);
        touch(item);
        matched += 1;
    }
    matched
}

fn decode_field<T: DeserializeOwned>(fixture: &JsonValue, field: &'static str) -> Result<Vec<T>, SourceError> {
    match fixture.get(field) {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| SourceError::Decode {
            collection: field,
            message: e.to_string(),
        }),
    }
}

/// Equality filter on top-level fields of the serialized entity.
///
/// Anything other than a JSON object (including no filter) matches everything.
fn matches_filter<T: Serialize>(item: &T, filter: Option<&JsonValue>) -> bool {
    let Some(JsonValue::Object(wanted)) = filter else {
        return true;
    };
    let Ok(JsonValue::Object(actual)) = serde_json::to_value(item) else {
        return false;
    };
    wanted.iter().all(|(field, value)| actual.get(field) == Some(value))
}

fn filtered<T: Clone + Serialize>(items: &[T], filter: Option<&JsonValue>) -> Vec<T> {
    items
        .iter()
        .filter(|item| matches_filter(*item, filter))
        .cloned()
        .collect()
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn products(&self, filter: Option<JsonValue>) -> Result<Vec<Product>, SourceError> {
        if self.fail_products_query.load(Ordering::SeqCst) {
            return Err(SourceError::Transport("products query unavailable".to_string()));
        }
        let products = self
            .products
            .read()
            .map_err(|_| SourceError::Transport("products store poisoned".to_string()))?;
        Ok(filtered(&products, filter.as_ref()))
    }

    async fn inventory(
        &self,
        filter: Option<JsonValue>,
    ) -> Result<Vec<InventoryRecord>, SourceError> {
        if self.fail_inventory_query.load(Ordering::SeqCst) {
            return Err(SourceError::Transport("inventory query unavailable".to_string()));
        }
        let inventory = self
            .inventory
            .read()
            .map_err(|_| SourceError::Transport("inventory store poisoned".to_string()))?;
        Ok(filtered(&inventory, filter.as_ref()))
    }
}

#[async_trait]
impl PublishDispatcher for InMemoryCatalog {
    async fn update_product_publish(
        &self,
        ids: Vec<String>,
        published: bool,
    ) -> Result<MutationResponse, MutationError> {
        self.record_call(EntityKind::Product, &ids, published);
        if self.fail_product_publish.load(Ordering::SeqCst) {
            return Err(MutationError::Transport("updateProductPublish unavailable".to_string()));
        }

        let mut products = self
            .products
            .write()
            .map_err(|_| MutationError::Rejected("products store poisoned".to_string()))?;
        let now = Utc::now();
        let matched = mark_published(&mut products, &ids, published, |p| p.updated_at = Some(now));

        Ok(MutationResponse::ok(
            format!("{matched} product(s) updated"),
            json!({ "matched": matched }),
        ))
    }

    async fn update_inventory_publish(
        &self,
        ids: Vec<String>,
        published: bool,
    ) -> Result<MutationResponse, MutationError> {
        self.record_call(EntityKind::Inventory, &ids, published);
        if self.fail_inventory_publish.load(Ordering::SeqCst) {
            return Err(MutationError::Transport("updateInventoryPublish unavailable".to_string()));
        }

        let mut inventory = self
            .inventory
            .write()
            .map_err(|_| MutationError::Rejected("inventory store poisoned".to_string()))?;
        let now = Utc::now();
        let matched = mark_published(&mut inventory, &ids, published, |r| r.updated_at = Some(now));

        Ok(MutationResponse::ok(
            format!("{matched} inventory record(s) updated"),
            json!({ "matched": matched }),
        ))
    }
}
