use colored::Colorize;
use serde::Serialize;

use crate::domain::entities::document::IndexedDocument;
use crate::domain::ports::KnowledgeBase;
use crate::presentation::cli::formatters::{print_section_header, sanitize_terminal};

const PREVIEW_CHARS: usize = 100;

#[derive(Serialize)]
struct DocumentListing<'a> {
    count: usize,
    documents: &'a [IndexedDocument],
}

/// First `PREVIEW_CHARS` characters of a chunk on a single line.
#[must_use]
pub fn preview(content: &str) -> String {
    let flat: String = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}…")
}

/// # Errors
///
/// Returns an error if the listing cannot be fetched or serialized.
pub async fn run_documents(backend: &dyn KnowledgeBase, json: bool) -> anyhow::Result<()> {
    let documents = backend.documents().await?;

    if json {
        let listing = DocumentListing {
            count: documents.len(),
            documents: &documents,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    print_section_header(&format!("\nIndexed documents ({})", documents.len()));
    if documents.is_empty() {
        println!("  {}", "Nothing indexed yet".dimmed());
        return Ok(());
    }
    for doc in &documents {
        println!(
            "  {} {}",
            sanitize_terminal(&doc.source).cyan(),
            sanitize_terminal(&preview(&doc.content))
        );
    }
    Ok(())
}
