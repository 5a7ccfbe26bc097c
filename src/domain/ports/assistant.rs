use async_trait::async_trait;

use super::backend::BackendError;
use crate::domain::entities::message::HistoryEntry;

/// Reply used when the backend answers without any text.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "No response received";

#[async_trait]
pub trait ChatAssistant: Send + Sync {
    /// Ask the assistant `query` with the full conversation so far as context.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the body does not decode.
    async fn reply(&self, query: &str, history: &[HistoryEntry]) -> Result<String, BackendError>;
}
