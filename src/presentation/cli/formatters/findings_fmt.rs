use colored::Colorize;

use crate::domain::entities::finding::ComplianceFinding;
use crate::domain::value_objects::compliance_status::ComplianceStatus;

use super::sanitize_terminal;

fn status_badge(status: ComplianceStatus) -> String {
    let label = format!(" {status} ");
    match status {
        ComplianceStatus::NonCompliant => format!("{}", label.on_red().white().bold()),
        ComplianceStatus::InProgress => format!("{}", label.on_yellow().black().bold()),
        ComplianceStatus::Compliant => format!("{}", label.on_green().black()),
    }
}

pub fn format_findings(findings: &[ComplianceFinding]) {
    for finding in findings {
        println!();
        println!(
            "{} {} {}",
            format!("#{}", finding.id).dimmed(),
            status_badge(finding.status),
            sanitize_terminal(&finding.regulation).bold()
        );
        if !finding.issues.is_empty() {
            println!("  Issues:     {}", sanitize_terminal(&finding.issues));
        }
        if !finding.next_steps.is_empty() {
            println!("  Next steps: {}", sanitize_terminal(&finding.next_steps).cyan());
        }
    }
    println!();
}

/// One-line tally, e.g. `3 findings: 1 non-compliant, 1 in-progress, 1 compliant`.
#[must_use]
pub fn summarize(findings: &[ComplianceFinding]) -> String {
    let count = |status| findings.iter().filter(|f| f.status == status).count();
    let violations = count(ComplianceStatus::NonCompliant);
    let summary = format!(
        "{} finding(s): {} non-compliant, {} in-progress, {} compliant",
        findings.len(),
        violations,
        count(ComplianceStatus::InProgress),
        count(ComplianceStatus::Compliant),
    );
    if violations > 0 {
        summary.red().bold().to_string()
    } else {
        summary.green().to_string()
    }
}

pub fn print_no_findings() {
    println!();
    println!("{}", "No regulations were evaluated".yellow());
    println!();
}
