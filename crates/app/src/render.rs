//! Plain-text rendering of the inventory table.

use core::fmt::Write;

use merchdesk_view::{RowView, ViewModel};

const HEADER: [&str; 5] = ["No.", "Name", "Price", "Stock", "Published"];

/// Render the table plus the bulk-action panel line.
pub fn render_table(view: &ViewModel) -> String {
    let mut lines: Vec<[String; 5]> = Vec::new();
    let mut selected: Vec<bool> = Vec::new();
    collect(&view.rows, 0, &mut lines, &mut selected);

    let mut widths = HEADER.map(str::len);
    for line in &lines {
        for (w, cell) in widths.iter_mut().zip(line.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, "   ", &HEADER.map(String::from), &widths);
    for (line, is_selected) in lines.iter().zip(selected) {
        let marker = if is_selected { "[x]" } else { "[ ]" };
        push_line(&mut out, marker, line, &widths);
    }

    if view.rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    let panel = if view.panel_visible { "open" } else { "closed" };
    let _ = writeln!(
        out,
        "selection panel: {panel} ({} selected) [Publish] [Unpublish]",
        view.selected_count
    );
    out
}

fn collect(rows: &[RowView], depth: usize, lines: &mut Vec<[String; 5]>, selected: &mut Vec<bool>) {
    for row in rows {
        let indent = "  ".repeat(depth);
        lines.push([
            format!("{indent}{}", row.ordinal),
            format!("{indent}{}", row.name),
            row.price.to_string(),
            row.stock.to_string(),
            row.published.to_string(),
        ]);
        selected.push(row.selected);
        if let Some(children) = &row.children {
            collect(children, depth + 1, lines, selected);
        }
    }
}

fn push_line(out: &mut String, marker: &str, cells: &[String; 5], widths: &[usize; 5]) {
    let _ = write!(out, "{marker}");
    for (cell, width) in cells.iter().zip(widths) {
        let _ = write!(out, " {cell:<width$} |");
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use merchdesk_catalog::{InventoryRecord, Product};
    use merchdesk_view::{QueryState, RowRef, SelectionState, derive_view};

    #[test]
    fn renders_parents_children_and_panel() {
        let products = QueryState::ready(vec![Product {
            name: Some("Hoodie".to_string()),
            ..Product::new("p2")
        }]);
        let inventory = QueryState::ready(vec![InventoryRecord {
            stock: Some(3),
            variants: [("size", "S")].into_iter().collect(),
            ..InventoryRecord::for_product("i1", "p2")
        }]);
        let selection = SelectionState::new()
            .on_selection_changed(vec![RowRef::classify("i1", Some("p2"))])
            .state;

        let text = render_table(&derive_view(&products, &inventory, &selection));
        let lines: Vec<_> = text.lines().collect();

        assert!(lines[0].contains("Published"));
        assert!(lines[1].starts_with("[ ]") && lines[1].contains("Hoodie"));
        assert!(lines[2].starts_with("[x]") && lines[2].contains("  S"));
        assert!(lines[2].contains("Off"));
        assert_eq!(lines[3], "selection panel: open (1 selected) [Publish] [Unpublish]");
    }

    #[test]
    fn empty_view_says_so() {
        let view = derive_view(
            &QueryState::pending(),
            &QueryState::pending(),
            &SelectionState::new(),
        );
        let text = render_table(&view);
        assert!(text.contains("(no rows)"));
        assert!(text.contains("selection panel: closed"));
    }
}
