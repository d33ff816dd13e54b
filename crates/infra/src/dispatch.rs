//! Write-side collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::MutationError;

/// Payload returned by both publish mutations.
///
/// `success == false` is still a completed mutation; only an `Err` from the
/// dispatcher counts as a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: JsonValue,
}

impl MutationResponse {
    pub fn ok(message: impl Into<String>, data: JsonValue) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Batched publish-state mutations.
#[async_trait]
pub trait PublishDispatcher: Send + Sync {
    async fn update_product_publish(
        &self,
        ids: Vec<String>,
        published: bool,
    ) -> Result<MutationResponse, MutationError>;

    async fn update_inventory_publish(
        &self,
        ids: Vec<String>,
        published: bool,
    ) -> Result<MutationResponse, MutationError>;
}
