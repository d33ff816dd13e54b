//! Bulk publish / unpublish across a mixed selection.
//!
//! A selection is split once into product ids and inventory ids
//! ([`Partition`]); each non-empty side becomes one batched mutation running
//! as its own task, followed on completion by a refetch of that side's
//! collection only.

pub mod coordinator;
pub mod partition;

pub use coordinator::{PartitionOutcome, PublishCoordinator, PublishReport, PublishTasks};
pub use partition::Partition;
