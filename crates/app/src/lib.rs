//! `merchdesk-app` — the inventory page host.
//!
//! Wires the catalog queries, the selection tracker and the publish
//! coordinator into one [`InventorySession`], and renders its view model as
//! text for the `merchdesk` console.

pub mod config;
pub mod render;
pub mod session;

pub use config::{AppConfig, ConfigError};
pub use session::InventorySession;
