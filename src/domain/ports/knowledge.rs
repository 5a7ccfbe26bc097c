use async_trait::async_trait;

use super::backend::BackendError;
use crate::domain::entities::document::{HealthStatus, IndexedDocument};

/// Read-only view of the assistant backend's own state.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// # Errors
    ///
    /// Returns `BackendError` if the backend is unreachable or answers garbage.
    async fn health(&self) -> Result<HealthStatus, BackendError>;

    /// List the regulation chunks the assistant retrieves from.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the body does not decode.
    async fn documents(&self) -> Result<Vec<IndexedDocument>, BackendError>;
}
