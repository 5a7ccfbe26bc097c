use serde::{Deserialize, Serialize};

/// Index of the next synthetic history sample to request.
///
/// Only moves forward, by exactly one per successful poll.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct StepCursor(u64);

impl StepCursor {
    #[must_use]
    pub const fn starting_at(step: u64) -> Self {
        Self(step)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The step after this one, or `None` when the index space is used up.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(step) => Some(Self(step)),
            None => None,
        }
    }
}

impl std::fmt::Display for StepCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
