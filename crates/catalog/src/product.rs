use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use merchdesk_core::{Entity, ProductId};

use crate::variants::Variants;

/// Catalog product as served by the `products` query.
///
/// A product either stands alone (its own `variants`, `price` and `stock`
/// describe the single sellable unit) or parents several inventory records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub variants: Option<Variants>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Bare, unpublished product with every optional field unset.
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            variants: None,
            price: None,
            stock: None,
            published: false,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

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
            "_id": "p1",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-02T10:00:00Z",
            "name": null,
            "description": "Cotton tee",
            "variants": {"color": "red", "size": "M"},
            "published": true
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.name, None);
        assert_eq!(product.description.as_deref(), Some("Cotton tee"));
        assert!(product.published);
        let variants = product.variants.unwrap();
        assert_eq!(variants.values().collect::<Vec<_>>(), vec!["red", "M"]);
        assert!(product.created_at.is_some());
    }

    #[test]
    fn missing_published_defaults_to_false() {
        let product: Product = serde_json::from_str(r#"{"_id":"p2"}"#).unwrap();
        assert!(!product.published);
        assert_eq!(product, Product::new("p2"));
    }
}
