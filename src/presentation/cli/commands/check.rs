use colored::Colorize;

use crate::application::services::ComplianceOrchestrator;
use crate::presentation::cli::formatters::findings_fmt::{
    format_findings, print_no_findings, summarize,
};
use crate::presentation::cli::formatters::print_section_header;

/// Run one compliance check and print the findings.
///
/// # Errors
///
/// Returns an error if the snapshot fetch or the evaluation fails, or if
/// JSON serialization fails.
pub async fn run_check(orchestrator: &ComplianceOrchestrator, json: bool) -> anyhow::Result<()> {
    if !json {
        println!("{}", "Fetching sensor snapshot and checking compliance...".dimmed());
    }

    let findings = orchestrator.run_check().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
        return Ok(());
    }

    print_section_header("\nCompliance Assessment");
    if findings.is_empty() {
        print_no_findings();
        return Ok(());
    }
    format_findings(&findings);
    println!("{}", summarize(&findings));
    Ok(())
}
