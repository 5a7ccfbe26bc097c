#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use complimo::application::services::{ComplianceError, ComplianceOrchestrator};
use complimo::domain::entities::finding::ComplianceFinding;
use complimo::domain::entities::telemetry::TelemetrySample;
use complimo::domain::ports::{BackendError, ComplianceEvaluator, TelemetrySource};
use complimo::domain::value_objects::check_state::CheckState;
use complimo::domain::value_objects::compliance_status::ComplianceStatus;

// ---------------------------------------------------------------------------
// Mocks
// ---------------------------------------------------------------------------

/// Snapshot source whose responses are scripted per call.
struct SnapshotSource {
    script: Mutex<VecDeque<Result<Value, BackendError>>>,
    calls: AtomicUsize,
}

impl SnapshotSource {
    fn new(script: Vec<Result<Value, BackendError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn always_ok() -> Arc<Self> {
        Self::new(vec![])
    }
}

#[async_trait]
impl TelemetrySource for SnapshotSource {
    async fn fetch_sample(&self, step: u64) -> Result<TelemetrySample, BackendError> {
        Err(BackendError::HistoryExhausted(step))
    }

    async fn fetch_snapshot(&self, index: u64) -> Result<Value, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "device": index })))
    }
}

struct ScriptedEvaluator {
    script: Mutex<VecDeque<Result<Vec<ComplianceFinding>, BackendError>>>,
}

impl ScriptedEvaluator {
    fn new(script: Vec<Result<Vec<ComplianceFinding>, BackendError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
        })
    }
}

#[async_trait]
impl ComplianceEvaluator for ScriptedEvaluator {
    async fn evaluate(&self, _sensor_data: &Value) -> Result<Vec<ComplianceFinding>, BackendError> {
        self.script
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Ok(vec![]))
    }
}

/// Evaluator that parks until released.
struct GatedEvaluator {
    started: Notify,
    release: Notify,
}

#[async_trait]
impl ComplianceEvaluator for GatedEvaluator {
    async fn evaluate(&self, _sensor_data: &Value) -> Result<Vec<ComplianceFinding>, BackendError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(vec![finding("EN 15232", ComplianceStatus::Compliant)])
    }
}

fn finding(regulation: &str, status: ComplianceStatus) -> ComplianceFinding {
    ComplianceFinding {
        id: 42,
        regulation: regulation.into(),
        issues: String::new(),
        status,
        next_steps: String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_run_then_successful_run_leaves_only_new_findings() {
    let source = SnapshotSource::new(vec![Err(BackendError::Network(
        "connection refused".into(),
    ))]);
    let evaluator = ScriptedEvaluator::new(vec![Ok(vec![
        finding("ASHRAE 90.1", ComplianceStatus::NonCompliant),
        finding("EN 15232", ComplianceStatus::Compliant),
        finding("EPBD", ComplianceStatus::InProgress),
    ])]);
    let orchestrator = ComplianceOrchestrator::new(source, evaluator, 0);

    let err = orchestrator.run_check().await.expect_err("first run fails");
    assert!(matches!(err, ComplianceError::Backend(BackendError::Network(_))));
    assert_eq!(orchestrator.state(), CheckState::Failed);
    assert!(orchestrator.findings().is_empty());

    orchestrator.run_check().await.expect("second run succeeds");

    let findings = orchestrator.findings();
    assert_eq!(findings.len(), 3);
    assert_eq!(
        findings.iter().map(|f| f.id).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(
        findings.iter().map(|f| f.regulation.as_str()).collect::<Vec<_>>(),
        vec!["ASHRAE 90.1", "EN 15232", "EPBD"]
    );
    assert_eq!(orchestrator.state(), CheckState::Done);
}

#[tokio::test]
async fn successful_run_replaces_previous_findings_wholesale() {
    let evaluator = ScriptedEvaluator::new(vec![
        Ok(vec![
            finding("old-a", ComplianceStatus::Compliant),
            finding("old-b", ComplianceStatus::NonCompliant),
        ]),
        Ok(vec![finding("new", ComplianceStatus::Compliant)]),
    ]);
    let orchestrator = ComplianceOrchestrator::new(SnapshotSource::always_ok(), evaluator, 0);

    orchestrator.run_check().await.expect("first run");
    orchestrator.run_check().await.expect("second run");

    let findings = orchestrator.findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].regulation, "new");
    assert_eq!(findings[0].id, 0);
    assert!(!findings.iter().any(|f| f.regulation.starts_with("old")));
}

#[tokio::test]
async fn empty_response_clears_findings() {
    let evaluator = ScriptedEvaluator::new(vec![
        Ok(vec![finding("a", ComplianceStatus::Compliant)]),
        Ok(vec![]),
    ]);
    let orchestrator = ComplianceOrchestrator::new(SnapshotSource::always_ok(), evaluator, 0);

    orchestrator.run_check().await.expect("first run");
    orchestrator.run_check().await.expect("second run");

    assert!(orchestrator.findings().is_empty());
    assert_eq!(orchestrator.state(), CheckState::Done);
}

#[tokio::test]
async fn overlapping_run_is_rejected_without_side_effects() {
    let source = SnapshotSource::always_ok();
    let evaluator = Arc::new(GatedEvaluator {
        started: Notify::new(),
        release: Notify::new(),
    });
    let orchestrator = Arc::new(ComplianceOrchestrator::new(
        source.clone(),
        evaluator.clone(),
        0,
    ));

    let first = {
        let orchestrator = Arc::clone(&orchestrator);
        tokio::spawn(async move { orchestrator.run_check().await })
    };
    evaluator.started.notified().await;
    assert_eq!(orchestrator.state(), CheckState::Submitting);
    assert!(orchestrator.is_running());

    let second = orchestrator.run_check().await;
    assert_eq!(second, Err(ComplianceError::Busy));
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(orchestrator.state(), CheckState::Submitting);

    evaluator.release.notify_one();
    let findings = first
        .await
        .expect("task joins")
        .expect("first run succeeds");
    assert_eq!(findings.len(), 1);
    assert_eq!(orchestrator.state(), CheckState::Done);

    // The token is free again once the first run finished.
    evaluator.release.notify_one();
    orchestrator.run_check().await.expect("third run");
}
