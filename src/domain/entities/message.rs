use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry of the conversation log. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: u64,
    pub content: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    #[must_use]
    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            content: self.content.clone(),
            is_user: self.is_user,
        }
    }
}

/// The slice of a message that is sent back to the assistant as context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub content: String,
    #[serde(rename = "isUser")]
    pub is_user: bool,
}
