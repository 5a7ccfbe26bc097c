pub mod compliance;
pub mod conversation;
pub mod poller;

pub use compliance::{ComplianceError, ComplianceOrchestrator};
pub use conversation::{ConversationManager, Exchange};
pub use poller::{PollOutcome, PollerHandle, PollerSettings, TelemetryPoller, TelemetryView};
