pub mod document;
pub mod finding;
pub mod message;
pub mod telemetry;
pub mod window;

pub use document::{HealthStatus, IndexedDocument};
pub use finding::ComplianceFinding;
pub use message::{ConversationMessage, HistoryEntry};
pub use telemetry::{FlowPoint, PowerPoint, TelemetrySample};
pub use window::MetricsWindow;
