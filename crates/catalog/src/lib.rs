//! Catalog data model.
//!
//! Products and inventory records exactly as the catalog backend hands them
//! out. Nothing here knows about rows, selection or publishing.

pub mod inventory;
pub mod kind;
pub mod product;
pub mod variants;

pub use inventory::InventoryRecord;
pub use kind::EntityKind;
pub use product::Product;
pub use variants::Variants;
