use serde::{Deserialize, Serialize};

/// Lifecycle of a compliance check run.
///
/// `FetchingSnapshot` and `Submitting` are only ever observed while a run
/// holds the orchestrator's single-flight token.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CheckState {
    #[default]
    Idle,
    FetchingSnapshot,
    Submitting,
    Done,
    Failed,
}

impl CheckState {
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::FetchingSnapshot | Self::Submitting)
    }
}

impl std::fmt::Display for CheckState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::FetchingSnapshot => write!(f, "fetching snapshot"),
            Self::Submitting => write!(f, "submitting"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
