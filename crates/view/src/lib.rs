//! Inventory view model.
//!
//! Pure functions from the two catalog snapshots (plus the current selection)
//! to a render-ready row tree:
//!
//! - [`merge`] attaches inventory records to their parent products
//! - [`derive`] computes displayed name / price / stock / published tag
//! - [`sort`] applies the price and stock column comparators
//! - [`selection`] tracks the selection and the bulk-action panel
//! - [`view_model`] ties them together in [`derive_view`]
//!
//! Nothing here performs IO; the host re-invokes [`derive_view`] whenever a
//! source snapshot or the selection changes.

pub mod derive;
pub mod merge;
pub mod row;
pub mod selection;
pub mod sort;
pub mod source;
pub mod view_model;

pub use derive::{Cell, PublishedTag};
pub use merge::{merge, merge_sources};
pub use row::{Row, RowRef, RowSource};
pub use selection::{PanelTransition, SelectionState, SelectionUpdate};
pub use sort::{SortColumn, SortDirection, SortSpec, sort_rows};
pub use source::QueryState;
pub use view_model::{RowView, ViewModel, derive_view, derive_view_with};
