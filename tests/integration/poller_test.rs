#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::Notify;

use complimo::application::services::{PollOutcome, PollerSettings, TelemetryPoller};
use complimo::domain::entities::telemetry::TelemetrySample;
use complimo::domain::ports::{BackendError, TelemetrySource};

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

fn sample(flow: f64, fault: bool) -> TelemetrySample {
    TelemetrySample {
        timestamp: Utc::now(),
        power_w: flow * 100.0,
        relative_flow_pct: flow,
        absolute_flow_m3_s: Some(0.02),
        flow_volume_total_m3: None,
        delta_temp_k: 5.0,
        setpoint_delta_k: 6.0,
        remote_temp_k: 291.0,
        embedded_temp_k: 285.0,
        cooling_j: 1.0e9,
        heating_j: 2.0e9,
        operating_h: 100.0,
        active_h: 80.0,
        flow_fault: fault,
    }
}

/// Replays a fixed list of responses, one per request.
struct ScriptedSource {
    script: Mutex<VecDeque<Result<TelemetrySample, BackendError>>>,
    steps: Mutex<Vec<u64>>,
}

impl ScriptedSource {
    fn new(script: Vec<Result<TelemetrySample, BackendError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            steps: Mutex::new(vec![]),
        })
    }
}

#[async_trait]
impl TelemetrySource for ScriptedSource {
    async fn fetch_sample(&self, step: u64) -> Result<TelemetrySample, BackendError> {
        self.steps.lock().expect("lock").push(step);
        self.script
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or(Err(BackendError::HistoryExhausted(step)))
    }

    async fn fetch_snapshot(&self, _index: u64) -> Result<Value, BackendError> {
        Ok(Value::Null)
    }
}

/// Holds every fetch until released, so a test can tear down mid-flight.
struct GatedSource {
    started: Notify,
    release: Notify,
}

#[async_trait]
impl TelemetrySource for GatedSource {
    async fn fetch_sample(&self, _step: u64) -> Result<TelemetrySample, BackendError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(sample(99.0, true))
    }

    async fn fetch_snapshot(&self, _index: u64) -> Result<Value, BackendError> {
        Ok(Value::Null)
    }
}

fn poller(source: Arc<dyn TelemetrySource>) -> Arc<TelemetryPoller> {
    Arc::new(TelemetryPoller::new(source, PollerSettings::default()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn eleven_polls_keep_last_ten_flow_points() {
    let script = (70..=80).map(|flow| Ok(sample(f64::from(flow), false))).collect();
    let source = ScriptedSource::new(script);
    let poller = poller(source.clone());

    for _ in 0..11 {
        assert!(poller.poll().await.is_applied());
    }

    let flows: Vec<f64> = poller.flow_window().iter().map(|p| p.flow_pct).collect();
    let expected: Vec<f64> = (71..=80).map(f64::from).collect();
    assert_eq!(flows, expected);
    assert_eq!(poller.power_window().len(), 10);
    assert_eq!(poller.cursor().value(), 11);
    assert_eq!(*source.steps.lock().expect("lock"), (0..11).collect::<Vec<u64>>());
}

#[tokio::test]
async fn cursor_counts_only_successes() {
    let net = || Err(BackendError::Network("connection reset".into()));
    let decode = || Err(BackendError::Decode("missing HVAC_Metrics".into()));
    let script = vec![
        net(),
        Ok(sample(70.0, false)),
        decode(),
        net(),
        Ok(sample(71.0, false)),
        Ok(sample(72.0, false)),
        Err(BackendError::Status(502)),
    ];
    let source = ScriptedSource::new(script);
    let poller = poller(source.clone());

    let mut successes = 0;
    for _ in 0..7 {
        if poller.poll().await.is_applied() {
            successes += 1;
        }
    }

    assert_eq!(successes, 3);
    assert_eq!(poller.cursor().value(), 3);
    // Failed steps are requested again on the next poll.
    assert_eq!(
        *source.steps.lock().expect("lock"),
        vec![0, 0, 1, 1, 1, 2, 3]
    );
    let flows: Vec<f64> = poller.flow_window().iter().map(|p| p.flow_pct).collect();
    assert_eq!(flows, vec![70.0, 71.0, 72.0]);
}

#[tokio::test]
async fn failure_after_success_keeps_previous_view() {
    let source = ScriptedSource::new(vec![
        Ok(sample(74.0, true)),
        Err(BackendError::Network("timeout".into())),
    ]);
    let poller = poller(source);

    poller.poll().await;
    let before = poller.view();
    let outcome = poller.poll().await;

    assert!(matches!(outcome, PollOutcome::Failed { step: 1, .. }));
    let after = poller.view();
    assert_eq!(after.latest, before.latest);
    assert_eq!(after.flow, before.flow);
    assert_eq!(after.power, before.power);
    assert_eq!(after.cursor, before.cursor);
    assert!(after.flow_fault);
}

#[tokio::test]
async fn fault_clears_on_next_clean_sample() {
    let source = ScriptedSource::new(vec![Ok(sample(60.0, true)), Ok(sample(75.0, false))]);
    let poller = poller(source);

    poller.poll().await;
    assert!(poller.flow_fault());
    poller.poll().await;
    assert!(!poller.flow_fault());
}

#[tokio::test]
async fn response_after_teardown_is_discarded() {
    let source = Arc::new(GatedSource {
        started: Notify::new(),
        release: Notify::new(),
    });
    let poller = poller(source.clone());
    let mut handle = poller.activate_every(Duration::from_secs(3600));

    // First tick fires immediately; wait until its fetch is in flight.
    source.started.notified().await;
    handle.teardown();
    assert!(!handle.is_active());
    source.release.notify_one();

    let outcome = tokio::time::timeout(Duration::from_secs(5), handle.next_outcome())
        .await
        .expect("poll resolves");
    assert_eq!(outcome, Some(PollOutcome::Stale { step: 0 }));

    handle.join().await;
    assert!(poller.latest().is_none());
    assert!(poller.flow_window().is_empty());
    assert_eq!(poller.cursor().value(), 0);
    assert!(!poller.flow_fault());
}

#[tokio::test]
async fn timer_stops_feeding_after_teardown() {
    let script = (0..50).map(|i| Ok(sample(f64::from(i), false))).collect();
    let source = ScriptedSource::new(script);
    let poller = poller(source.clone());
    let mut handle = poller.activate_every(Duration::from_millis(10));

    for _ in 0..3 {
        let outcome = tokio::time::timeout(Duration::from_secs(5), handle.next_outcome())
            .await
            .expect("tick");
        assert!(outcome.is_some_and(|o| o.is_applied()));
    }
    handle.join().await;

    let frozen = poller.cursor();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(poller.cursor(), frozen);
    assert_eq!(
        source.steps.lock().expect("lock").len() as u64,
        frozen.value()
    );
}
