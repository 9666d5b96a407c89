//! Support conversation entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Breaks ties between sessions created within the same millisecond.
static SESSION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Role of a message in a support conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A message in a support conversation (Entity)
///
/// `observed_at` is attached at ingestion time on this client. The backend
/// does not serve per-message timestamps, so this is a client-side
/// approximation of when the message was first seen, not server truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub text: String,
    pub observed_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(id: impl Into<String>, role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            text: text.into(),
            observed_at: Utc::now(),
        }
    }

    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, MessageRole::User, text)
    }

    pub fn assistant(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, MessageRole::Assistant, text)
    }
}

/// A single conversational thread in the chat widget (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub last_activity: DateTime<Utc>,
}

impl ChatSession {
    /// Title shown until the first user message derives a real one.
    pub const PLACEHOLDER_TITLE: &'static str = "New conversation";

    /// Create a session seeded with one assistant message.
    ///
    /// The id is time-based (millisecond resolution) with a process-local
    /// sequence number breaking same-millisecond ties.
    pub fn seeded(seed_text: impl Into<String>) -> Self {
        let now = Utc::now();
        let seq = SESSION_SEQ.fetch_add(1, Ordering::Relaxed);
        let id = format!("session-{}-{}", now.timestamp_millis(), seq);
        let seed = ChatMessage {
            id: format!("{}-seed", id),
            role: MessageRole::Assistant,
            text: seed_text.into(),
            observed_at: now,
        };
        Self {
            id,
            title: Self::PLACEHOLDER_TITLE.to_string(),
            messages: vec![seed],
            last_activity: now,
        }
    }

    pub fn has_user_message(&self) -> bool {
        self.messages.iter().any(|m| m.role == MessageRole::User)
    }
}
