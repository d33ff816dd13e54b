//! Domain error model.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic failures raised while building domain values.
///
/// Fetch and mutation failures are collaborator concerns and live in
/// `merchdesk-infra`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was blank or otherwise unusable.
    #[error("invalid {kind}: {reason}")]
    InvalidId { kind: &'static str, reason: String },
}

impl DomainError {
    pub fn invalid_id(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidId {
            kind,
            reason: reason.into(),
        }
    }
}
