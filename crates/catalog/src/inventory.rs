use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use merchdesk_core::{Entity, InventoryId, ProductId};

use crate::kind::EntityKind;
use crate::variants::Variants;

/// Priced, stocked unit for one variant combination of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    #[serde(rename = "_id")]
    pub id: InventoryId,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub variants: Variants,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl InventoryRecord {
    pub fn new(id: impl Into<InventoryId>) -> Self {
        Self {
            id: id.into(),
            product_id: None,
            price: None,
            stock: None,
            variants: Variants::new(),
            published: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Record attached to `product_id`.
    pub fn for_product(id: impl Into<InventoryId>, product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            ..Self::new(id)
        }
    }

    /// Parent product reference, with an empty reference treated as absent.
    pub fn parent_id(&self) -> Option<&ProductId> {
        self.product_id.as_ref().filter(|id| !id.as_str().is_empty())
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::classify(self.product_id.as_ref().map(ProductId::as_str))
    }
}

impl Entity for InventoryRecord {
    type Id = InventoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn published(&self) -> bool {
        self.published
    }

    fn set_published(&mut self, published: bool) {
        self.published = published;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_query_payload() {
        let json = r#"{
            "_id": "i1",
            "productId": "p2",
            "price": 19.5,
            "stock": 3,
            "variants": {"color": "blue"},
            "published": false
        }"#;

        let record: InventoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.parent_id().map(ProductId::as_str), Some("p2"));
        assert_eq!(record.price, Some(19.5));
        assert_eq!(record.stock, Some(3));
        assert_eq!(record.kind(), EntityKind::Inventory);
    }

    #[test]
    fn empty_parent_reference_is_absent() {
        let record: InventoryRecord =
            serde_json::from_str(r#"{"_id":"i9","productId":"","variants":null}"#).unwrap();
        assert_eq!(record.parent_id(), None);
        assert_eq!(record.kind(), EntityKind::Product);
        assert!(record.variants.is_empty());
    }
}
