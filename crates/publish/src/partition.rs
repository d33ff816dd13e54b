use serde::{Deserialize, Serialize};

use merchdesk_catalog::EntityKind;
use merchdesk_view::RowRef;

/// Selection split by entity kind, ids in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub product_ids: Vec<String>,
    pub inventory_ids: Vec<String>,
}

impl Partition {
    pub fn from_selection(selection: &[RowRef]) -> Self {
        let mut partition = Partition::default();
        for row in selection {
            match row.kind {
                EntityKind::Inventory => partition.inventory_ids.push(row.id.clone()),
                EntityKind::Product => partition.product_ids.push(row.id.clone()),
            }
        }
        partition
    }

    pub fn ids(&self, kind: EntityKind) -> &[String] {
        match kind {
            EntityKind::Product => &self.product_ids,
            EntityKind::Inventory => &self.inventory_ids,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty() && self.inventory_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_mixed_selection_by_kind() {
        let selection = vec![
            RowRef::classify("i1", Some("p9")),
            RowRef::classify("p1", None),
            RowRef::classify("i2", Some("p9")),
            RowRef::classify("p2", Some("")),
            RowRef::classify("i3", Some("p8")),
        ];

        let partition = Partition::from_selection(&selection);
        assert_eq!(partition.product_ids, vec!["p1", "p2"]);
        assert_eq!(partition.inventory_ids, vec!["i1", "i2", "i3"]);
        assert_eq!(partition.ids(EntityKind::Inventory).len(), 3);
    }

    #[test]
    fn empty_selection_gives_empty_partition() {
        assert!(Partition::from_selection(&[]).is_empty());
    }
}
