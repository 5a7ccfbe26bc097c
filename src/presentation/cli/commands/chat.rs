use std::io::Write;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::config::DEFAULT_GREETING;
use crate::application::services::{ConversationManager, Exchange};
use crate::presentation::cli::formatters::sanitize_terminal;

const EXIT_WORDS: [&str; 3] = ["exit", "quit", ":q"];

fn print_assistant(content: &str) {
    println!("{} {}", "assistant>".green().bold(), sanitize_terminal(content));
}

fn print_exchange(exchange: &Exchange) {
    print_assistant(&exchange.answer.content);
    if let Some(error) = &exchange.error {
        println!("{}", format!("  ({error})").dimmed());
    }
}

/// Whether a line of input should be sent at all.
#[must_use]
pub fn is_sendable(line: &str) -> bool {
    !line.trim().is_empty()
}

/// Ask a single question and print the answer.
///
/// # Errors
///
/// Returns an error if the query is blank.
pub async fn run_chat_once(manager: &ConversationManager, query: &str) -> anyhow::Result<()> {
    if !is_sendable(query) {
        anyhow::bail!("Query is empty");
    }
    let exchange = manager.send(query.trim()).await;
    print_exchange(&exchange);
    Ok(())
}

/// Interactive chat on stdin until EOF or an exit word.
///
/// Blank lines are ignored and never reach the assistant. An unseeded
/// conversation shows the default greeting without adding it to the log.
///
/// # Errors
///
/// Returns an error if stdin or stdout fails.
pub async fn run_chat(manager: &ConversationManager) -> anyhow::Result<()> {
    if manager.is_empty() {
        print_assistant(DEFAULT_GREETING);
    }
    for message in manager.messages() {
        print_assistant(&message.content);
    }
    println!("{}", "Type a question, or 'exit' to leave.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", "you>".cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let query = line.trim();
        if EXIT_WORDS.contains(&query) {
            break;
        }
        if !is_sendable(query) {
            continue;
        }
        let exchange = manager.send(query).await;
        print_exchange(&exchange);
    }

    tracing::debug!(messages = manager.len(), "chat session closed");
    Ok(())
}
