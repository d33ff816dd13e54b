//! Merged row tree nodes.

use serde::{Deserialize, Serialize};

use merchdesk_catalog::{EntityKind, InventoryRecord, Product, Variants};
use merchdesk_core::ProductId;

/// Catalog entity a row was built from.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSource {
    Product(Product),
    Inventory(InventoryRecord),
}

/// One node of the inventory table.
///
/// Top-level rows always come from products. `children` is `None` for a leaf
/// and holds the product's inventory records (in collection order) otherwise;
/// it is never `Some(vec![])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub source: RowSource,
    pub children: Option<Vec<Row>>,
}

impl Row {
    pub fn leaf(product: Product) -> Self {
        Self {
            source: RowSource::Product(product),
            children: None,
        }
    }

    pub fn inventory(record: InventoryRecord) -> Self {
        Self {
            source: RowSource::Inventory(record),
            children: None,
        }
    }

    /// Table row key; equal to the source entity's id.
    pub fn key(&self) -> &str {
        match &self.source {
            RowSource::Product(p) => p.id.as_str(),
            RowSource::Inventory(i) => i.id.as_str(),
        }
    }

    /// Parent product reference; only inventory rows carry one.
    pub fn product_id(&self) -> Option<&ProductId> {
        match &self.source {
            RowSource::Product(_) => None,
            RowSource::Inventory(i) => i.product_id.as_ref(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::classify(self.product_id().map(ProductId::as_str))
    }

    pub fn is_parent(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn children(&self) -> &[Row] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn name(&self) -> Option<&str> {
        match &self.source {
            RowSource::Product(p) => p.name.as_deref(),
            RowSource::Inventory(_) => None,
        }
    }

    pub fn variants(&self) -> Option<&Variants> {
        match &self.source {
            RowSource::Product(p) => p.variants.as_ref(),
            RowSource::Inventory(i) => Some(&i.variants),
        }
    }

    pub fn price(&self) -> Option<f64> {
        match &self.source {
            RowSource::Product(p) => p.price,
            RowSource::Inventory(i) => i.price,
        }
    }

    pub fn stock(&self) -> Option<i64> {
        match &self.source {
            RowSource::Product(p) => p.stock,
            RowSource::Inventory(i) => i.stock,
        }
    }

    pub fn published(&self) -> bool {
        match &self.source {
            RowSource::Product(p) => p.published,
            RowSource::Inventory(i) => i.published,
        }
    }

    /// Depth-first search for a row by key (parents before their children).
    pub fn find<'a>(rows: &'a [Row], key: &str) -> Option<&'a Row> {
        rows.iter().find_map(|row| {
            if row.key() == key {
                Some(row)
            } else {
                Row::find(row.children(), key)
            }
        })
    }
}

/// Lightweight reference to a selected row.
///
/// The entity kind is fixed here, when a row enters the selection, so bulk
/// actions never need to inspect entity fields again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowRef {
    pub id: String,
    pub kind: EntityKind,
}

impl RowRef {
    /// Classify a raw `(id, productId)` pair coming from the table.
    pub fn classify(id: impl Into<String>, product_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::classify(product_id),
        }
    }
}

impl From<&Row> for RowRef {
    fn from(row: &Row) -> Self {
        Self {
            id: row.key().to_string(),
            kind: row.kind(),
        }
    }
}
