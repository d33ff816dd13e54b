//! Read-side collaborator.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use merchdesk_catalog::{InventoryRecord, Product};

use crate::error::SourceError;

/// The two catalog queries.
///
/// `filter` is an optional structured filter passed through untouched; its
/// interpretation belongs to the implementation.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn products(&self, filter: Option<JsonValue>) -> Result<Vec<Product>, SourceError>;

    async fn inventory(
        &self,
        filter: Option<JsonValue>,
    ) -> Result<Vec<InventoryRecord>, SourceError>;
}

/// One collection of a [`CatalogSource`], addressed by element type.
#[async_trait]
pub trait CollectionFetcher<T>: Send + Sync {
    async fn fetch(&self, filter: Option<JsonValue>) -> Result<Vec<T>, SourceError>;
}

#[async_trait]
impl<S> CollectionFetcher<Product> for S
where
    S: CatalogSource + ?Sized,
{
    async fn fetch(&self, filter: Option<JsonValue>) -> Result<Vec<Product>, SourceError> {
        self.products(filter).await
    }
}

#[async_trait]
impl<S> CollectionFetcher<InventoryRecord> for S
where
    S: CatalogSource + ?Sized,
{
    async fn fetch(&self, filter: Option<JsonValue>) -> Result<Vec<InventoryRecord>, SourceError> {
        self.inventory(filter).await
    }
}
