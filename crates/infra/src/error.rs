use thiserror::Error;

/// A read operation failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode {collection} payload: {message}")]
    Decode {
        collection: &'static str,
        message: String,
    },
}

/// A write operation failed before producing a response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MutationError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("mutation rejected: {0}")]
    Rejected(String),
}
