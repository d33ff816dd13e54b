//! Column sorting for the price and stock columns.
//!
//! Neither comparator is a total order. The price comparator only ever says
//! `Greater` or `Equal`; the stock comparator treats any row with a missing
//! (or zero) stock as equal to everything. `sort_rows` therefore uses a stable
//! insertion sort that only moves an element past a neighbour the comparator
//! reports as `Greater`, instead of `slice::sort_by`.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::row::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    Price,
    Stock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(column: SortColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: SortColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }
}

/// `Greater` when `a`'s price is strictly greater than `b`'s, `Equal` otherwise.
///
/// A missing price compares as `0`, so any positive price is greater than a
/// missing one. `NaN` is never greater than anything.
pub fn compare_price(a: &Row, b: &Row) -> Ordering {
    if a.price().unwrap_or(0.0) > b.price().unwrap_or(0.0) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Numeric comparison when both stocks are set and non-zero, `Equal` otherwise.
///
/// Compares the raw field, not the derived parent sum.
pub fn compare_stock(a: &Row, b: &Row) -> Ordering {
    match (a.stock(), b.stock()) {
        (Some(x), Some(y)) if x != 0 && y != 0 => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

/// Sort top-level rows and, recursively, every children list.
pub fn sort_rows(rows: &mut [Row], spec: SortSpec) {
    let compare: fn(&Row, &Row) -> Ordering = match spec.column {
        SortColumn::Price => compare_price,
        SortColumn::Stock => compare_stock,
    };
    sort_level(rows, compare, spec.direction);
}

fn sort_level(rows: &mut [Row], compare: fn(&Row, &Row) -> Ordering, direction: SortDirection) {
    insertion_sort_by(rows, |a, b| match direction {
        SortDirection::Ascending => compare(a, b),
        SortDirection::Descending => compare(b, a),
    });
    for row in rows.iter_mut() {
        if let Some(children) = row.children.as_mut() {
            sort_level(children, compare, direction);
        }
    }
}

fn insertion_sort_by<T>(items: &mut [T], compare: impl Fn(&T, &T) -> Ordering) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::RowSource;
    use merchdesk_catalog::{InventoryRecord, Product};

    fn priced(id: &str, price: Option<f64>) -> Row {
        Row::leaf(Product {
            price,
            ..Product::new(id)
        })
    }

    fn stocked(id: &str, stock: Option<i64>) -> Row {
        Row::leaf(Product {
            stock,
            ..Product::new(id)
        })
    }

    fn keys(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(Row::key).collect()
    }

    #[test]
    fn price_comparator_is_greater_or_equal_only() {
        let cheap = priced("a", Some(5.0));
        let dear = priced("b", Some(10.0));
        assert_eq!(compare_price(&dear, &cheap), Ordering::Greater);
        assert_eq!(compare_price(&cheap, &dear), Ordering::Equal);
        assert_eq!(compare_price(&cheap, &cheap), Ordering::Equal);
        assert_eq!(compare_price(&dear, &priced("c", None)), Ordering::Greater);
        assert_eq!(compare_price(&priced("c", None), &dear), Ordering::Equal);
        assert_eq!(compare_price(&priced("c", None), &priced("d", Some(-1.0))), Ordering::Greater);
        assert_eq!(compare_price(&priced("e", Some(f64::NAN)), &cheap), Ordering::Equal);
    }

    #[test]
    fn stock_comparator_ignores_missing_operands() {
        let few = stocked("a", Some(2));
        let many = stocked("b", Some(9));
        assert_eq!(compare_stock(&few, &many), Ordering::Less);
        assert_eq!(compare_stock(&many, &few), Ordering::Greater);
        assert_eq!(compare_stock(&many, &stocked("c", None)), Ordering::Equal);
        assert_eq!(compare_stock(&many, &stocked("d", Some(0))), Ordering::Equal);
    }

    #[test]
    fn ascending_price_sort_orders_fully_priced_rows() {
        let mut rows = vec![
            priced("a", Some(10.0)),
            priced("b", Some(5.0)),
            priced("c", Some(20.0)),
        ];
        sort_rows(&mut rows, SortSpec::ascending(SortColumn::Price));
        assert_eq!(keys(&rows), vec!["b", "a", "c"]);
    }

    #[test]
    fn descending_price_sort_reverses_arguments() {
        let mut rows = vec![
            priced("a", Some(10.0)),
            priced("b", Some(5.0)),
            priced("c", Some(20.0)),
        ];
        sort_rows(&mut rows, SortSpec::descending(SortColumn::Price));
        assert_eq!(keys(&rows), vec!["c", "a", "b"]);
    }

    #[test]
    fn missing_price_sorts_as_zero() {
        let mut rows = vec![
            priced("a", Some(10.0)),
            priced("b", None),
            priced("c", Some(5.0)),
        ];
        sort_rows(&mut rows, SortSpec::ascending(SortColumn::Price));
        assert_eq!(keys(&rows), vec!["b", "c", "a"]);
    }

    #[test]
    fn stock_sort_keeps_rows_without_stock_in_place() {
        let mut rows = vec![
            stocked("a", None),
            stocked("b", Some(8)),
            stocked("c", Some(3)),
            stocked("d", None),
        ];
        sort_rows(&mut rows, SortSpec::ascending(SortColumn::Stock));
        assert_eq!(keys(&rows), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn children_are_sorted_within_their_parent() {
        let child = |id: &str, stock: i64| {
            Row::inventory(InventoryRecord {
                stock: Some(stock),
                ..InventoryRecord::for_product(id, "p1")
            })
        };
        let mut rows = vec![Row {
            source: RowSource::Product(Product::new("p1")),
            children: Some(vec![child("i1", 7), child("i2", 1), child("i3", 4)]),
        }];

        sort_rows(&mut rows, SortSpec::ascending(SortColumn::Stock));
        assert_eq!(keys(rows[0].children()), vec!["i2", "i3", "i1"]);
    }
}
