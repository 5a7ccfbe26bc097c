use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::domain::entities::finding::{assign_ids, ComplianceFinding};
use crate::domain::ports::backend::BackendError;
use crate::domain::ports::compliance::ComplianceEvaluator;
use crate::domain::ports::telemetry::TelemetrySource;
use crate::domain::value_objects::check_state::CheckState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComplianceError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("a compliance check is already running")]
    Busy,
}

/// Fetches a sensor snapshot and submits it for evaluation.
///
/// At most one run is in flight per orchestrator. A run that finds another
/// one in progress is rejected with [`ComplianceError::Busy`] instead of
/// queuing, since its result would replace the other one's anyway.
pub struct ComplianceOrchestrator {
    telemetry: Arc<dyn TelemetrySource>,
    evaluator: Arc<dyn ComplianceEvaluator>,
    snapshot_index: u64,
    flight: tokio::sync::Mutex<()>,
    state: Mutex<CheckState>,
    findings: Mutex<Vec<ComplianceFinding>>,
}

impl ComplianceOrchestrator {
    #[must_use]
    pub fn new(
        telemetry: Arc<dyn TelemetrySource>,
        evaluator: Arc<dyn ComplianceEvaluator>,
        snapshot_index: u64,
    ) -> Self {
        Self {
            telemetry,
            evaluator,
            snapshot_index,
            flight: tokio::sync::Mutex::new(()),
            state: Mutex::new(CheckState::Idle),
            findings: Mutex::new(Vec::new()),
        }
    }

    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, next: CheckState) {
        let mut state = Self::lock(&self.state);
        tracing::debug!(from = %*state, to = %next, "compliance check transition");
        *state = next;
    }

    /// Run one check and, on success, replace the stored findings wholesale.
    ///
    /// Findings are renumbered `0..n-1` in response order. On failure the
    /// previous findings stay as they were and the state becomes `Failed`.
    ///
    /// # Errors
    ///
    /// Returns [`ComplianceError::Busy`] if another run holds the token, or
    /// the backend error of whichever stage failed.
    pub async fn run_check(&self) -> Result<Vec<ComplianceFinding>, ComplianceError> {
        let Ok(_token) = self.flight.try_lock() else {
            tracing::warn!("compliance check rejected: another run is in progress");
            return Err(ComplianceError::Busy);
        };

        match self.fetch_and_submit().await {
            Ok(findings) => {
                let findings = assign_ids(findings);
                *Self::lock(&self.findings) = findings.clone();
                self.transition(CheckState::Done);
                tracing::info!(count = findings.len(), "compliance check completed");
                Ok(findings)
            }
            Err(e) => {
                self.transition(CheckState::Failed);
                tracing::warn!("compliance check failed: {e}");
                Err(e.into())
            }
        }
    }

    async fn fetch_and_submit(&self) -> Result<Vec<ComplianceFinding>, BackendError> {
        self.transition(CheckState::FetchingSnapshot);
        let snapshot = self.telemetry.fetch_snapshot(self.snapshot_index).await?;

        self.transition(CheckState::Submitting);
        self.evaluator.evaluate(&snapshot).await
    }

    #[must_use]
    pub fn findings(&self) -> Vec<ComplianceFinding> {
        Self::lock(&self.findings).clone()
    }

    #[must_use]
    pub fn state(&self) -> CheckState {
        *Self::lock(&self.state)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }
}
