use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::application::config::TelemetryConfig;
use crate::domain::entities::telemetry::{FlowPoint, PowerPoint, TelemetrySample};
use crate::domain::entities::window::MetricsWindow;
use crate::domain::ports::backend::BackendError;
use crate::domain::ports::telemetry::TelemetrySource;
use crate::domain::rules::fault::FaultMonitor;
use crate::domain::value_objects::step_cursor::StepCursor;

/// Outcomes buffered for a watcher before new ones are dropped.
const OUTCOME_BUFFER: usize = 32;

/// Runtime knobs for the poller, derived from [`TelemetryConfig`].
#[derive(Debug, Clone)]
pub struct PollerSettings {
    pub interval: Duration,
    pub window_capacity: usize,
    pub flow_setpoint_pct: f64,
    pub start_step: u64,
    pub history_len: Option<u64>,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self::from(&TelemetryConfig::default())
    }
}

impl From<&TelemetryConfig> for PollerSettings {
    fn from(config: &TelemetryConfig) -> Self {
        Self {
            interval: config.interval(),
            window_capacity: config.window_capacity.max(1),
            flow_setpoint_pct: config.flow_setpoint_pct,
            start_step: config.start_step,
            history_len: config.history_len,
        }
    }
}

/// Result of a single `poll()`.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Sample applied; the cursor moved past `step`.
    Applied { step: u64 },
    /// Fetch failed; nothing changed.
    Failed { step: u64, error: BackendError },
    /// Fetch resolved after teardown and was discarded.
    Stale { step: u64 },
}

impl PollOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Copy of everything the dashboard shows.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryView {
    pub latest: Option<TelemetrySample>,
    pub flow_fault: bool,
    pub power: Vec<PowerPoint>,
    pub flow: Vec<FlowPoint>,
    pub cursor: StepCursor,
}

struct TelemetryState {
    latest: Option<TelemetrySample>,
    power: MetricsWindow<PowerPoint>,
    flow: MetricsWindow<FlowPoint>,
    cursor: StepCursor,
}

impl TelemetryState {
    fn apply(&mut self, sample: TelemetrySample, setpoint_pct: f64, next: StepCursor) {
        self.power.push(sample.power_point());
        self.flow.push(sample.flow_point(setpoint_pct));
        self.latest = Some(sample);
        self.cursor = next;
    }
}

/// Periodic fetch loop feeding the power and flow windows.
///
/// Polls are serialized: a manual `poll()` racing the timer waits for the
/// in-flight one, so the cursor always equals the number of applied samples
/// (plus the configured start step).
pub struct TelemetryPoller {
    source: Arc<dyn TelemetrySource>,
    settings: PollerSettings,
    state: Mutex<TelemetryState>,
    poll_gate: tokio::sync::Mutex<()>,
    generation: AtomicU64,
}

impl TelemetryPoller {
    #[must_use]
    pub fn new(source: Arc<dyn TelemetrySource>, settings: PollerSettings) -> Self {
        let state = TelemetryState {
            latest: None,
            power: MetricsWindow::new(settings.window_capacity),
            flow: MetricsWindow::new(settings.window_capacity),
            cursor: StepCursor::starting_at(settings.start_step),
        };
        Self {
            source,
            settings,
            state: Mutex::new(state),
            poll_gate: tokio::sync::Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, TelemetryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch the sample at the current cursor and apply it.
    ///
    /// Failures are logged and leave the latest sample, both windows and the
    /// cursor untouched. There is no immediate retry; the next tick tries the
    /// same step again.
    ///
    /// A step at or past `history_len`, or one with no successor, fails with
    /// [`BackendError::HistoryExhausted`] without issuing a request.
    pub async fn poll(&self) -> PollOutcome {
        let _gate = self.poll_gate.lock().await;
        let generation = self.generation.load(Ordering::Acquire);
        let cursor = self.state().cursor;
        let step = cursor.value();

        let beyond_history = self.settings.history_len.is_some_and(|len| step >= len);
        let next = match cursor.next() {
            Some(next) if !beyond_history => next,
            _ => {
                let error = BackendError::HistoryExhausted(step);
                tracing::warn!(step, "telemetry poll skipped: {error}");
                return PollOutcome::Failed { step, error };
            }
        };

        let result = self.source.fetch_sample(step).await;
        let stale = || self.generation.load(Ordering::Acquire) != generation;

        match result {
            Ok(sample) => {
                let mut state = self.state();
                if stale() {
                    tracing::debug!(step, "discarding telemetry sample resolved after teardown");
                    return PollOutcome::Stale { step };
                }
                state.apply(sample, self.settings.flow_setpoint_pct, next);
                tracing::debug!(step, "telemetry sample applied");
                PollOutcome::Applied { step }
            }
            Err(_) if stale() => {
                tracing::debug!(step, "discarding telemetry failure resolved after teardown");
                PollOutcome::Stale { step }
            }
            Err(error) => {
                tracing::warn!(step, "telemetry poll failed: {error}");
                PollOutcome::Failed { step, error }
            }
        }
    }

    /// Start the repeating timer. The first poll fires immediately.
    #[must_use]
    pub fn activate(self: &Arc<Self>) -> PollerHandle {
        self.activate_every(self.settings.interval)
    }

    #[must_use]
    pub fn activate_every(self: &Arc<Self>, period: Duration) -> PollerHandle {
        let poller = Arc::clone(self);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let (outcome_tx, outcome_rx) = mpsc::channel(OUTCOME_BUFFER);

        tracing::info!(?period, "telemetry poller activated");
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => {
                        let outcome = poller.poll().await;
                        if outcome_tx.try_send(outcome).is_err() {
                            tracing::trace!("poll outcome dropped, no reader keeping up");
                        }
                    }
                }
            }
            tracing::info!("telemetry poller stopped");
        });

        PollerHandle {
            poller: Arc::clone(self),
            stop: Some(stop_tx),
            task: Some(task),
            outcomes: outcome_rx,
        }
    }

    // Bumped under the state lock so a sample is either applied before
    // teardown or recognised as stale, never half of each.
    fn invalidate_in_flight(&self) {
        let _state = self.state();
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    #[must_use]
    pub fn latest(&self) -> Option<TelemetrySample> {
        self.state().latest.clone()
    }

    #[must_use]
    pub fn cursor(&self) -> StepCursor {
        self.state().cursor
    }

    /// Current alarm, derived from the latest sample only.
    #[must_use]
    pub fn flow_fault(&self) -> bool {
        self.state().latest.as_ref().is_some_and(FaultMonitor::status)
    }

    #[must_use]
    pub fn power_window(&self) -> Vec<PowerPoint> {
        self.state().power.to_vec()
    }

    #[must_use]
    pub fn flow_window(&self) -> Vec<FlowPoint> {
        self.state().flow.to_vec()
    }

    #[must_use]
    pub fn view(&self) -> TelemetryView {
        let state = self.state();
        TelemetryView {
            latest: state.latest.clone(),
            flow_fault: state.latest.as_ref().is_some_and(FaultMonitor::status),
            power: state.power.to_vec(),
            flow: state.flow.to_vec(),
            cursor: state.cursor,
        }
    }
}

/// Owner of a running poll timer. Dropping it tears the timer down.
pub struct PollerHandle {
    poller: Arc<TelemetryPoller>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    outcomes: mpsc::Receiver<PollOutcome>,
}

impl PollerHandle {
    /// Wait for the next poll to finish. `None` once the timer has stopped.
    pub async fn next_outcome(&mut self) -> Option<PollOutcome> {
        self.outcomes.recv().await
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.stop.is_some()
    }

    /// Stop the timer and invalidate any fetch still in flight.
    ///
    /// The in-flight request itself is not aborted; its result is discarded
    /// when it resolves. Calling this twice is a no-op.
    pub fn teardown(&mut self) {
        if let Some(stop) = self.stop.take() {
            self.poller.invalidate_in_flight();
            let _ = stop.send(());
            tracing::info!("telemetry poller torn down");
        }
    }

    /// Tear down and wait for the timer task to exit.
    ///
    /// The task only notices the stop signal between polls, so this waits for
    /// a fetch already in flight, up to the backend request timeout. Use
    /// [`teardown`](Self::teardown) alone when that wait is unwanted.
    pub async fn join(mut self) {
        self.teardown();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("telemetry poller task ended abnormally: {e}");
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}
