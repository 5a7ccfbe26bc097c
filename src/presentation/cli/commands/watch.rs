use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;

use crate::application::services::{PollOutcome, TelemetryPoller};
use crate::presentation::cli::formatters::telemetry_fmt::{
    flow_trend, format_sample_line, power_trend, print_telemetry_view,
};

/// Follow live telemetry, printing one line per poll.
///
/// Runs until Ctrl+C or, if `max_polls` is set, until that many polls have
/// completed (failed polls count). The timer is torn down before returning so
/// a late response cannot touch the final view; a request still in flight is
/// not waited for.
///
/// # Errors
///
/// Returns an error if a JSON snapshot cannot be serialized.
pub async fn run_watch(
    poller: &Arc<TelemetryPoller>,
    period: Duration,
    max_polls: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    watch_until(poller, period, max_polls, json, tokio::signal::ctrl_c()).await
}

async fn watch_until<F: Future>(
    poller: &Arc<TelemetryPoller>,
    period: Duration,
    max_polls: Option<u64>,
    json: bool,
    shutdown: F,
) -> anyhow::Result<()> {
    let mut handle = poller.activate_every(period);
    if !json {
        let banner = format!("Watching telemetry every {period:?} (Ctrl+C to stop)");
        println!("{}", banner.dimmed());
    }

    tokio::pin!(shutdown);

    let mut completed = 0u64;
    loop {
        tokio::select! {
            outcome = handle.next_outcome() => {
                let Some(outcome) = outcome else { break };
                completed += 1;
                report(poller, &outcome, json)?;
                if max_polls.is_some_and(|max| completed >= max) {
                    break;
                }
            }
            _ = &mut shutdown => {
                tracing::info!("interrupt received, stopping telemetry watch");
                break;
            }
        }
    }

    // A hung fetch would hold join() for the full request timeout; the
    // generation bump in teardown already makes its result stale.
    handle.teardown();
    drop(handle);
    if !json {
        print_telemetry_view(&poller.view());
    }
    Ok(())
}

fn report(poller: &TelemetryPoller, outcome: &PollOutcome, json: bool) -> anyhow::Result<()> {
    match outcome {
        PollOutcome::Applied { step } => {
            let view = poller.view();
            if json {
                println!("{}", serde_json::to_string(&view)?);
            } else if let Some(sample) = &view.latest {
                println!("{}", format_sample_line(*step, sample));
                println!("       {} {}", "kW".dimmed(), power_trend(&view.power));
                println!("       {}  {}", "%".dimmed(), flow_trend(&view.flow));
            }
        }
        PollOutcome::Failed { step, error } => {
            if !json {
                println!("{}", format!("[{step:>4}] poll failed: {error}").red());
            }
        }
        PollOutcome::Stale { .. } => {}
    }
    Ok(())
}
