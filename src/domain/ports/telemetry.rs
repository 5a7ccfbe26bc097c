use async_trait::async_trait;
use serde_json::Value;

use super::backend::BackendError;
use crate::domain::entities::telemetry::TelemetrySample;

#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Fetch the synthetic history sample at `step`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails, the body does not decode,
    /// or the backend has no sample at that step.
    async fn fetch_sample(&self, step: u64) -> Result<TelemetrySample, BackendError>;

    /// Fetch the raw sensor snapshot for a device index, left undecoded so it
    /// can be forwarded to the compliance evaluator as-is.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the body is not JSON.
    async fn fetch_snapshot(&self, index: u64) -> Result<Value, BackendError>;
}
