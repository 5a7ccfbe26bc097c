use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::application::config::{ChatConfig, DEFAULT_FALLBACK_MESSAGE};
use crate::domain::entities::message::{ConversationMessage, HistoryEntry};
use crate::domain::ports::assistant::ChatAssistant;
use crate::domain::ports::backend::BackendError;

/// One completed `send`: the question, the answer, and why the answer is a
/// fallback if it is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub question: ConversationMessage,
    pub answer: ConversationMessage,
    pub error: Option<BackendError>,
}

impl Exchange {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Default)]
struct ConversationLog {
    messages: Vec<ConversationMessage>,
    next_id: u64,
}

impl ConversationLog {
    fn append(&mut self, content: String, is_user: bool) -> ConversationMessage {
        let message = ConversationMessage {
            id: self.next_id,
            content,
            is_user,
            timestamp: Utc::now(),
        };
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }

    fn history(&self) -> Vec<HistoryEntry> {
        self.messages
            .iter()
            .map(ConversationMessage::history_entry)
            .collect()
    }
}

/// Append-only conversation with the compliance assistant.
///
/// Sends are serialized per conversation: a second `send` waits until the
/// first has appended its answer, so the log always reads question, answer,
/// question, answer in call order.
pub struct ConversationManager {
    assistant: Arc<dyn ChatAssistant>,
    fallback_message: String,
    turn: tokio::sync::Mutex<()>,
    log: Mutex<ConversationLog>,
}

impl ConversationManager {
    #[must_use]
    pub fn new(assistant: Arc<dyn ChatAssistant>) -> Self {
        Self::with_fallback(assistant, DEFAULT_FALLBACK_MESSAGE)
    }

    #[must_use]
    pub fn with_fallback(
        assistant: Arc<dyn ChatAssistant>,
        fallback_message: impl Into<String>,
    ) -> Self {
        Self {
            assistant,
            fallback_message: fallback_message.into(),
            turn: tokio::sync::Mutex::new(()),
            log: Mutex::new(ConversationLog::default()),
        }
    }

    /// Build from config, seeding the configured greeting if there is one.
    #[must_use]
    pub fn from_config(assistant: Arc<dyn ChatAssistant>, config: &ChatConfig) -> Self {
        let manager = Self::with_fallback(assistant, config.fallback_message.clone());
        match &config.greeting {
            Some(greeting) => manager.greeted(greeting.clone()),
            None => manager,
        }
    }

    /// Open the conversation with an assistant message.
    #[must_use]
    pub fn greeted(self, greeting: impl Into<String>) -> Self {
        self.log().append(greeting.into(), false);
        self
    }

    fn log(&self) -> MutexGuard<'_, ConversationLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Ask the assistant `query`.
    ///
    /// The question is appended first and stays in the log whatever happens.
    /// The request carries the whole history including that question. If the
    /// assistant cannot be reached, the fixed fallback text is appended as the
    /// answer instead of returning an error.
    pub async fn send(&self, query: &str) -> Exchange {
        let _turn = self.turn.lock().await;

        let (question, history) = {
            let mut log = self.log();
            let question = log.append(query.to_owned(), true);
            (question, log.history())
        };

        let (content, error) = match self.assistant.reply(query, &history).await {
            Ok(reply) => (reply, None),
            Err(e) => {
                tracing::warn!("assistant request failed, using fallback reply: {e}");
                (self.fallback_message.clone(), Some(e))
            }
        };

        let answer = self.log().append(content, false);
        Exchange {
            question,
            answer,
            error,
        }
    }

    #[must_use]
    pub fn messages(&self) -> Vec<ConversationMessage> {
        self.log().messages.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log().messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log().messages.is_empty()
    }
}
