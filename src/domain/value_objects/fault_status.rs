use serde::{Deserialize, Serialize};

/// Display form of the flow-signal alarm.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FaultStatus {
    #[default]
    Normal,
    FlowSignalFault,
}

impl FaultStatus {
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        matches!(self, Self::FlowSignalFault)
    }
}

impl From<bool> for FaultStatus {
    fn from(faulty: bool) -> Self {
        if faulty {
            Self::FlowSignalFault
        } else {
            Self::Normal
        }
    }
}

impl std::fmt::Display for FaultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "All Systems Normal"),
            Self::FlowSignalFault => write!(f, "Flow Signal Fault"),
        }
    }
}
