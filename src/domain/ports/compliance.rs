use async_trait::async_trait;
use serde_json::Value;

use super::backend::BackendError;
use crate::domain::entities::finding::ComplianceFinding;

#[async_trait]
pub trait ComplianceEvaluator: Send + Sync {
    /// Submit a sensor snapshot and return the findings in response order.
    ///
    /// Ids on the returned findings are whatever the payload carried; callers
    /// renumber them.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the body is not an
    /// array of findings.
    async fn evaluate(&self, sensor_data: &Value) -> Result<Vec<ComplianceFinding>, BackendError>;
}
