use thiserror::Error;

/// Failure talking to the assistant backend.
///
/// Every variant is recoverable: callers log it and keep their prior state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("backend returned HTTP {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("no telemetry history at step {0}")]
    HistoryExhausted(u64),
}

impl BackendError {
    /// Whether the request never produced a usable HTTP exchange.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status(_))
    }

    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
