use serde::{Deserialize, Serialize};

/// Which of the two catalog collections an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Product,
    Inventory,
}

impl EntityKind {
    /// Classify an entity by its parent reference.
    ///
    /// Inventory records always point at a product; products never do. An
    /// empty reference counts as absent.
    pub fn classify(product_id: Option<&str>) -> Self {
        match product_id {
            Some(parent) if !parent.is_empty() => EntityKind::Inventory,
            _ => EntityKind::Product,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Inventory => "inventory",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_parent_reference_means_inventory() {
        assert_eq!(EntityKind::classify(Some("p1")), EntityKind::Inventory);
    }

    #[test]
    fn missing_or_empty_parent_reference_means_product() {
        assert_eq!(EntityKind::classify(None), EntityKind::Product);
        assert_eq!(EntityKind::classify(Some("")), EntityKind::Product);
    }
}
