//! Infrastructure layer: the catalog collaborators and their in-memory stand-ins.
//!
//! - [`source`]: the read side (`products` / `inventory` queries)
//! - [`dispatch`]: the write side (bulk publish mutations)
//! - [`query`]: cache-and-network collection queries feeding the view
//! - [`memory`]: an in-memory catalog implementing both sides, for tests/dev

pub mod dispatch;
pub mod error;
pub mod memory;
pub mod query;
pub mod source;

pub use dispatch::{MutationResponse, PublishDispatcher};
pub use error::{MutationError, SourceError};
pub use memory::{InMemoryCatalog, PublishCall};
pub use query::{CollectionQuery, Refetch};
pub use source::{CatalogSource, CollectionFetcher};
