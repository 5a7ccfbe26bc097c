use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// complimo: HVAC telemetry and compliance assistant client
///
/// Follows live valve telemetry, runs regulation compliance checks, and
/// chats with the compliance assistant.
#[derive(Parser, Debug)]
#[command(name = "complimo")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Follow live telemetry until Ctrl+C
    #[command(alias = "w")]
    Watch {
        /// Poll period in milliseconds (default: config)
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Stop after this many polls
        #[arg(short, long)]
        polls: Option<u64>,

        /// Print each snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run one compliance check
    #[command(alias = "ck")]
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the compliance assistant; interactive when no query is given
    #[command(alias = "c")]
    Chat {
        /// One-shot question
        query: Option<String>,
    },

    /// Probe the assistant backend
    #[command(alias = "h")]
    Health,

    /// List the regulation documents the assistant has indexed
    #[command(alias = "docs")]
    Documents {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
