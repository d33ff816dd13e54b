//! Product / inventory merge.

use std::collections::HashMap;

use merchdesk_catalog::{InventoryRecord, Product};
use merchdesk_core::ProductId;

use crate::row::{Row, RowSource};
use crate::source::QueryState;

/// Build the row tree from two collection snapshots.
///
/// Fails closed: while either query is unresolved or in an error state the
/// table is empty rather than partial.
pub fn merge_sources(
    products: &QueryState<Product>,
    inventory: &QueryState<InventoryRecord>,
) -> Vec<Row> {
    match (products.resolved(), inventory.resolved()) {
        (Some(p), Some(i)) => merge(p, i),
        _ => {
            tracing::debug!(
                products_failed = products.is_failed(),
                inventory_failed = inventory.is_failed(),
                "catalog sources unresolved; rendering empty table"
            );
            Vec::new()
        }
    }
}

/// Attach inventory records to their parent products.
///
/// Products keep their collection order. Each product's children keep the
/// relative order of `inventory`. Records whose parent is not in `products`
/// (or that have no parent) are dropped.
pub fn merge(products: &[Product], inventory: &[InventoryRecord]) -> Vec<Row> {
    let mut by_parent: HashMap<&ProductId, Vec<&InventoryRecord>> = HashMap::new();
    for record in inventory {
        if let Some(parent) = record.parent_id() {
            by_parent.entry(parent).or_default().push(record);
        }
    }

    let mut attached = 0usize;
    let rows: Vec<Row> = products
        .iter()
        .map(|product| {
            let children = by_parent.get(&product.id).map(|records| {
                attached += records.len();
                records
                    .iter()
                    .map(|r| Row::inventory((*r).clone()))
                    .collect::<Vec<_>>()
            });
            Row {
                source: RowSource::Product(product.clone()),
                children,
            }
        })
        .collect();

    let orphans = inventory.len().saturating_sub(attached);
    if orphans > 0 {
        tracing::debug!(orphans, "dropping inventory records without a known product");
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(Row::key).collect()
    }

    #[test]
    fn products_without_inventory_are_leaves() {
        let rows = merge(&[Product::new("p1"), Product::new("p2")], &[]);
        assert_eq!(keys(&rows), vec!["p1", "p2"]);
        assert!(rows.iter().all(|r| r.children.is_none()));
    }

    #[test]
    fn children_follow_inventory_order() {
        let products = vec![Product::new("p1"), Product::new("p2")];
        let inventory = vec![
            InventoryRecord::for_product("i3", "p2"),
            InventoryRecord::for_product("i1", "p1"),
            InventoryRecord::for_product("i2", "p2"),
        ];

        let rows = merge(&products, &inventory);
        assert_eq!(keys(rows[0].children()), vec!["i1"]);
        assert_eq!(keys(rows[1].children()), vec!["i3", "i2"]);
        assert!(rows[1].is_parent());
    }

    #[test]
    fn orphan_records_are_dropped() {
        let rows = merge(
            &[Product::new("p1")],
            &[
                InventoryRecord::for_product("i1", "ghost"),
                InventoryRecord::new("i2"),
            ],
        );
        assert_eq!(rows.len(), 1);
        assert!(rows[0].children.is_none());
        assert!(Row::find(&rows, "i1").is_none());
        assert!(Row::find(&rows, "i2").is_none());
    }

    #[test]
    fn child_rows_wrap_inventory_records() {
        let rows = merge(&[Product::new("p1")], &[InventoryRecord::for_product("i1", "p1")]);
        match &rows[0].children()[0].source {
            RowSource::Inventory(r) => assert_eq!(r.id.as_str(), "i1"),
            other => panic!("expected inventory row, got {other:?}"),
        }
    }

    #[test]
    fn pending_source_yields_empty_table() {
        let products = QueryState::ready(vec![Product::new("p1")]);
        let inventory = QueryState::<InventoryRecord>::pending();
        assert!(merge_sources(&products, &inventory).is_empty());
    }

    #[test]
    fn failed_source_yields_empty_table_even_with_stale_data() {
        let products = QueryState {
            data: Some(vec![Product::new("p1")]),
            loading: false,
            error: Some("network down".to_string()),
        };
        let inventory = QueryState::ready(Vec::new());
        assert!(merge_sources(&products, &inventory).is_empty());
    }

    #[test]
    fn resolved_sources_are_merged() {
        let products = QueryState::ready(vec![Product::new("p1")]);
        let inventory = QueryState::ready(vec![InventoryRecord::for_product("i1", "p1")]);
        let rows = merge_sources(&products, &inventory);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_parent());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn catalog() -> impl Strategy<Value = (Vec<Product>, Vec<InventoryRecord>)> {
            (1usize..8, prop::collection::vec((0usize..12, 0usize..1000), 0..30)).prop_map(
                |(product_count, records)| {
                    let products = (0..product_count)
                        .map(|n| Product::new(format!("p{n}").as_str()))
                        .collect();
                    // Parents at or past `product_count` are orphans.
                    let inventory = records
                        .into_iter()
                        .enumerate()
                        .map(|(n, (parent, stock))| {
                            let mut r = InventoryRecord::for_product(
                                format!("i{n}").as_str(),
                                format!("p{parent}").as_str(),
                            );
                            r.stock = Some(stock as i64);
                            r
                        })
                        .collect();
                    (products, inventory)
                },
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 128,
                .. ProptestConfig::default()
            })]

            #[test]
            fn every_product_yields_exactly_one_row((products, inventory) in catalog()) {
                let rows = merge(&products, &inventory);
                let row_keys: Vec<_> = rows.iter().map(Row::key).collect();
                let product_keys: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
                prop_assert_eq!(row_keys, product_keys);
            }

            #[test]
            fn children_are_an_order_preserving_subsequence((products, inventory) in catalog()) {
                let rows = merge(&products, &inventory);
                for row in &rows {
                    let expected: Vec<_> = inventory
                        .iter()
                        .filter(|r| r.parent_id().map(|p| p.as_str()) == Some(row.key()))
                        .map(|r| r.id.as_str())
                        .collect();
                    let actual: Vec<_> = row.children().iter().map(Row::key).collect();
                    prop_assert_eq!(&actual, &expected);
                    prop_assert_eq!(row.children.is_some(), !expected.is_empty());
                }
            }

            #[test]
            fn orphans_never_appear((products, inventory) in catalog()) {
                let rows = merge(&products, &inventory);
                for record in &inventory {
                    let parent_known = record
                        .parent_id()
                        .is_some_and(|p| products.iter().any(|prod| &prod.id == p));
                    prop_assert_eq!(Row::find(&rows, record.id.as_str()).is_some(), parent_known);
                }
            }
        }
    }
}
