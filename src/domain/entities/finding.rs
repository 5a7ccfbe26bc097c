use serde::{Deserialize, Serialize};

use crate::domain::value_objects::compliance_status::ComplianceStatus;

/// One compliance-assessment result item.
///
/// `id` is assigned locally from the position in the evaluator's response;
/// whatever id the payload carries is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceFinding {
    #[serde(skip_deserializing)]
    pub id: usize,
    pub regulation: String,
    #[serde(rename = "compliance_issues", alias = "issues", default)]
    pub issues: String,
    pub status: ComplianceStatus,
    #[serde(default)]
    pub next_steps: String,
}

impl ComplianceFinding {
    #[must_use]
    pub const fn is_violation(&self) -> bool {
        matches!(self.status, ComplianceStatus::NonCompliant)
    }
}

/// Renumber findings `0..n-1` in their current order.
#[must_use]
pub fn assign_ids(mut findings: Vec<ComplianceFinding>) -> Vec<ComplianceFinding> {
    for (id, finding) in findings.iter_mut().enumerate() {
        finding.id = id;
    }
    findings
}
