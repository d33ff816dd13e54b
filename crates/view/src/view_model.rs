//! Render-ready view of the inventory page.

use serde::{Deserialize, Serialize};

use merchdesk_catalog::{EntityKind, InventoryRecord, Product};

use crate::derive::{self, Cell, PublishedTag};
use crate::merge::merge_sources;
use crate::row::Row;
use crate::selection::SelectionState;
use crate::sort::{SortSpec, sort_rows};
use crate::source::QueryState;

/// One displayed table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowView {
    pub key: String,
    pub kind: EntityKind,
    /// `No.` column label, 1-based within the row's sibling list.
    pub ordinal: String,
    pub name: String,
    pub price: Cell<f64>,
    pub stock: Cell<i64>,
    pub published: PublishedTag,
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RowView>>,
}

/// Everything the host needs to draw the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub rows: Vec<RowView>,
    pub panel_visible: bool,
    pub has_selected: bool,
    pub selected_count: usize,
}

impl ViewModel {
    pub fn find(&self, key: &str) -> Option<&RowView> {
        find_view(&self.rows, key)
    }
}

fn find_view<'a>(rows: &'a [RowView], key: &str) -> Option<&'a RowView> {
    rows.iter().find_map(|row| {
        if row.key == key {
            Some(row)
        } else {
            row.children.as_deref().and_then(|c| find_view(c, key))
        }
    })
}

/// Derive the page from the latest snapshots and selection, unsorted.
pub fn derive_view(
    products: &QueryState<Product>,
    inventory: &QueryState<InventoryRecord>,
    selection: &SelectionState,
) -> ViewModel {
    derive_view_with(products, inventory, selection, None)
}

/// Derive the page, applying a column sort when one is active.
pub fn derive_view_with(
    products: &QueryState<Product>,
    inventory: &QueryState<InventoryRecord>,
    selection: &SelectionState,
    sort: Option<SortSpec>,
) -> ViewModel {
    let mut rows = merge_sources(products, inventory);
    if let Some(spec) = sort {
        sort_rows(&mut rows, spec);
    }

    ViewModel {
        rows: render_level(&rows, selection),
        panel_visible: selection.panel_visible,
        has_selected: selection.has_selected(),
        selected_count: selection.len(),
    }
}

fn render_level(rows: &[Row], selection: &SelectionState) -> Vec<RowView> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| RowView {
            key: row.key().to_string(),
            kind: row.kind(),
            ordinal: derive::ordinal_label(index),
            name: derive::display_name(row),
            price: derive::display_price(row),
            stock: derive::display_stock(row),
            published: derive::published_tag(row),
            selected: selection.contains(row.key()),
            children: row
                .children
                .as_deref()
                .map(|children| render_level(children, selection)),
        })
        .collect()
}
