use colored::Colorize;

use crate::domain::ports::KnowledgeBase;

/// # Errors
///
/// Returns an error if the backend cannot be reached or reports a non-ok
/// status.
pub async fn run_health(backend: &dyn KnowledgeBase, base_url: &str) -> anyhow::Result<()> {
    let health = backend.health().await?;
    let stamp = health.timestamp.as_deref().unwrap_or("-");

    if health.is_ok() {
        println!("{} {base_url} ({stamp})", "● up".green().bold());
        Ok(())
    } else {
        println!("{} {base_url}: {}", "● degraded".yellow().bold(), health.status);
        anyhow::bail!("Backend reported status '{}'", health.status)
    }
}
