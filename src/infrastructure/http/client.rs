use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Response, StatusCode};
use serde_json::Value;

use super::payload::{
    decode_findings, decode_reply, decode_sample, ChatRequest, ComplianceRequest, DocumentList,
};
use crate::application::config::BackendConfig;
use crate::domain::entities::document::{HealthStatus, IndexedDocument};
use crate::domain::entities::finding::ComplianceFinding;
use crate::domain::entities::message::HistoryEntry;
use crate::domain::entities::telemetry::TelemetrySample;
use crate::domain::ports::{
    BackendError, ChatAssistant, ComplianceEvaluator, KnowledgeBase, TelemetrySource,
};

/// JSON-over-HTTP client for the assistant backend.
///
/// One instance serves every port; clone the `Arc` rather than the client.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Build a client for `config.base_url` with the configured request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Network` if the HTTP client cannot be
    /// initialized (e.g. TLS backend failure).
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| BackendError::Network(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            client,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get(&self, path: &str) -> Result<Response, BackendError> {
        tracing::debug!(path, "GET");
        self.client
            .get(self.url(path))
            .send()
            .await
            .map_err(network)
    }

    async fn post<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, BackendError> {
        tracing::debug!(path, "POST");
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(network)
    }
}

fn network(e: reqwest::Error) -> BackendError {
    BackendError::Network(e.to_string())
}

/// Read the body of a 2xx response; anything else becomes `Status`.
async fn success_body(response: Response) -> Result<Vec<u8>, BackendError> {
    let status = response.status();
    if !status.is_success() {
        return Err(BackendError::Status(status.as_u16()));
    }
    response
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(network)
}

fn decode_json<T: serde::de::DeserializeOwned>(
    body: &[u8],
    what: &str,
) -> Result<T, BackendError> {
    serde_json::from_slice(body).map_err(|e| BackendError::Decode(format!("{what}: {e}")))
}

#[async_trait]
impl TelemetrySource for HttpBackend {
    async fn fetch_sample(&self, step: u64) -> Result<TelemetrySample, BackendError> {
        let response = self.get(&format!("/hvac-metrics/{step}")).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(BackendError::HistoryExhausted(step));
        }
        let body = success_body(response).await?;
        decode_sample(&body, Utc::now())
    }

    async fn fetch_snapshot(&self, index: u64) -> Result<Value, BackendError> {
        let response = self.get(&format!("/hvac-metrics/{index}")).await?;
        let body = success_body(response).await?;
        decode_json(&body, "sensor snapshot")
    }
}

#[async_trait]
impl ComplianceEvaluator for HttpBackend {
    async fn evaluate(&self, sensor_data: &Value) -> Result<Vec<ComplianceFinding>, BackendError> {
        let response = self
            .post("/check-compliance", &ComplianceRequest { sensor_data })
            .await?;
        let body = success_body(response).await?;
        decode_findings(&body)
    }
}

#[async_trait]
impl ChatAssistant for HttpBackend {
    async fn reply(&self, query: &str, history: &[HistoryEntry]) -> Result<String, BackendError> {
        let request = ChatRequest {
            query,
            conversation_history: history,
        };
        let response = self.post("/chat", &request).await?;
        let body = success_body(response).await?;
        decode_reply(&body)
    }
}

#[async_trait]
impl KnowledgeBase for HttpBackend {
    async fn health(&self) -> Result<HealthStatus, BackendError> {
        let body = success_body(self.get("/health").await?).await?;
        decode_json(&body, "health status")
    }

    async fn documents(&self) -> Result<Vec<IndexedDocument>, BackendError> {
        let body = success_body(self.get("/documents").await?).await?;
        decode_json::<DocumentList>(&body, "document list").map(|list| list.documents)
    }
}
