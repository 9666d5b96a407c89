//! Session registry: lifecycle of the chat widget's conversation threads.
//!
//! The registry owns every [`ChatSession`] plus the active-session pointer.
//! Sessions survive reloads (the list serializes); the active pointer
//! intentionally does not: each fresh load starts with no active session,
//! so opening the chat creates a new thread instead of resuming one.

use super::entities::{ChatMessage, ChatSession, MessageRole};
use crate::core::string::ellipsize;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Maximum title length derived from the first user message.
const TITLE_MAX_CHARS: usize = 30;

/// Ordered collection of chat sessions, newest-first by creation.
///
/// Invariant: `active_session_id`, when set, references a live entry in
/// `sessions`; deletion fails over to the next-most-recent session or to
/// none. All mutations are synchronous and never fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRegistry {
    sessions: Vec<ChatSession>,
    #[serde(skip)]
    active_session_id: Option<String>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn active_session_id(&self) -> Option<&str> {
        self.active_session_id.as_deref()
    }

    pub fn active_session(&self) -> Option<&ChatSession> {
        let id = self.active_session_id.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Sessions ordered by most recent activity, for the history view.
    pub fn by_recent_activity(&self) -> Vec<&ChatSession> {
        let mut ordered: Vec<&ChatSession> = self.sessions.iter().collect();
        ordered.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        ordered
    }

    /// Allocate a new session seeded with one assistant message, prepend it
    /// and make it active. Returns the new session's id.
    pub fn create_session(&mut self, seed_text: impl Into<String>) -> String {
        let session = ChatSession::seeded(seed_text);
        let id = session.id.clone();
        self.sessions.insert(0, session);
        self.active_session_id = Some(id.clone());
        id
    }

    /// Return the active session id, creating a fresh session when the
    /// pointer is unset or no longer resolves to a live entry.
    ///
    /// Guarantees callers a valid append target.
    pub fn ensure_active_session(&mut self, seed_text: impl Into<String>) -> String {
        if let Some(session) = self.active_session() {
            return session.id.clone();
        }
        self.create_session(seed_text)
    }

    /// Append a message to the active session.
    ///
    /// The first user-role message derives the session title (ellipsized at
    /// 30 characters) and every append bumps `last_activity`. Without an
    /// active session this is a no-op returning `false`; establishing one
    /// first via [`ensure_active_session`](Self::ensure_active_session) is
    /// the caller's contract.
    pub fn append_message(&mut self, role: MessageRole, text: impl Into<String>) -> bool {
        let Some(id) = self.active_session_id.clone() else {
            return false;
        };
        let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) else {
            return false;
        };

        let text = text.into();
        if role == MessageRole::User && !session.has_user_message() {
            session.title = ellipsize(&text, TITLE_MAX_CHARS);
        }

        let message_id = format!("{}-{}", session.id, session.messages.len());
        session.messages.push(ChatMessage::new(message_id, role, text));
        session.last_activity = Utc::now();
        true
    }

    /// Make `id` the active session; no-op when it does not exist.
    pub fn switch_session(&mut self, id: &str) {
        if self.sessions.iter().any(|s| s.id == id) {
            self.active_session_id = Some(id.to_string());
        }
    }

    /// Remove a session. When the active session is deleted the pointer
    /// fails over to the first remaining entry, or to none.
    pub fn delete_session(&mut self, id: &str) {
        self.sessions.retain(|s| s.id != id);
        if self.active_session_id.as_deref() == Some(id) {
            self.active_session_id = self.sessions.first().map(|s| s.id.clone());
        }
    }

    /// Rewrite the seed (first) assistant message of the active session.
    ///
    /// Used when the UI locale changes after the session was created in a
    /// different locale. Only the first message's text changes.
    pub fn update_seed_message(&mut self, text: impl Into<String>) {
        let Some(id) = self.active_session_id.clone() else {
            return;
        };
        if let Some(session) = self.sessions.iter_mut().find(|s| s.id == id)
            && let Some(seed) = session.messages.first_mut()
        {
            seed.text = text.into();
        }
    }
}
