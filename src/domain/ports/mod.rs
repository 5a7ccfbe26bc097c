pub mod assistant;
pub mod backend;
pub mod compliance;
pub mod knowledge;
pub mod telemetry;

pub use assistant::ChatAssistant;
pub use backend::BackendError;
pub use compliance::ComplianceEvaluator;
pub use knowledge::KnowledgeBase;
pub use telemetry::TelemetrySource;
