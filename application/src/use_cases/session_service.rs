//! Session service: durable wrapper around the session registry.
//!
//! Same shape as [`CartService`](super::cart_service::CartService): load on
//! construct, write the full registry back after every mutation that
//! changes persisted data. The active-session pointer is part of the
//! in-memory registry but is skipped by its serialization, so every fresh
//! load starts with no active session by construction.

use crate::ports::state_store::{CHAT_SESSIONS_NAMESPACE, StateStore};
use clearflow_domain::{ChatSession, MessageRole, SessionRegistry};
use std::sync::Arc;
use tracing::{debug, warn};

/// The chat widget's session registry, backed by a [`StateStore`] under the
/// `chat-sessions` namespace.
pub struct SessionService {
    registry: SessionRegistry,
    store: Arc<dyn StateStore>,
}

impl SessionService {
    pub fn load(store: Arc<dyn StateStore>) -> Self {
        let registry = match store.get(CHAT_SESSIONS_NAMESPACE) {
            Ok(Some(bytes)) => match serde_json::from_slice::<SessionRegistry>(&bytes) {
                Ok(registry) => registry,
                Err(e) => {
                    warn!("Discarding unreadable session snapshot: {}", e);
                    SessionRegistry::new()
                }
            },
            Ok(None) => SessionRegistry::new(),
            Err(e) => {
                warn!("Could not read persisted sessions: {}", e);
                SessionRegistry::new()
            }
        };
        debug!("Sessions loaded: {}", registry.sessions().len());
        Self { registry, store }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn active_session(&self) -> Option<&ChatSession> {
        self.registry.active_session()
    }

    pub fn create_session(&mut self, seed_text: impl Into<String>) -> String {
        let id = self.registry.create_session(seed_text);
        self.persist();
        id
    }

    pub fn ensure_active_session(&mut self, seed_text: impl Into<String>) -> String {
        let had_active = self.registry.active_session().is_some();
        let id = self.registry.ensure_active_session(seed_text);
        if !had_active {
            self.persist();
        }
        id
    }

    pub fn append_message(&mut self, role: MessageRole, text: impl Into<String>) -> bool {
        let appended = self.registry.append_message(role, text);
        if appended {
            self.persist();
        }
        appended
    }

    /// Only moves the in-memory active pointer; nothing persisted changes.
    pub fn switch_session(&mut self, id: &str) {
        self.registry.switch_session(id);
    }

    pub fn delete_session(&mut self, id: &str) {
        self.registry.delete_session(id);
        self.persist();
    }

    pub fn update_seed_message(&mut self, text: impl Into<String>) {
        self.registry.update_seed_message(text);
        self.persist();
    }

    fn persist(&self) {
        let bytes = match serde_json::to_vec(&self.registry) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Could not serialize sessions: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(CHAT_SESSIONS_NAMESPACE, &bytes) {
            warn!("Could not persist sessions: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::state_store::MemoryStateStore;

    #[test]
    fn test_sessions_survive_reload_active_does_not() {
        let store = Arc::new(MemoryStateStore::new());

        let mut service = SessionService::load(store.clone());
        service.create_session("How can we help?");
        service.append_message(MessageRole::User, "Do you ship to Dubai?");
        assert!(service.active_session().is_some());

        let reloaded = SessionService::load(store);
        assert_eq!(reloaded.registry().sessions().len(), 1);
        assert_eq!(reloaded.registry().sessions()[0].messages.len(), 2);
        // Fresh load starts with no active session
        assert!(reloaded.active_session().is_none());
    }

    #[test]
    fn test_append_without_active_does_not_persist() {
        let store = Arc::new(MemoryStateStore::new());
        let mut service = SessionService::load(store.clone());

        assert!(!service.append_message(MessageRole::User, "anyone?"));
        assert_eq!(store.get(CHAT_SESSIONS_NAMESPACE).unwrap(), None);
    }

    #[test]
    fn test_delete_persists_failover() {
        let store = Arc::new(MemoryStateStore::new());
        let mut service = SessionService::load(store.clone());
        let s1 = service.create_session("a");
        let s2 = service.create_session("b");

        service.switch_session(&s1);
        service.delete_session(&s1);
        assert_eq!(service.registry().active_session_id(), Some(s2.as_str()));

        let reloaded = SessionService::load(store);
        assert_eq!(reloaded.registry().sessions().len(), 1);
        assert_eq!(reloaded.registry().sessions()[0].id, s2);
    }

    #[test]
    fn test_corrupt_snapshot_discarded() {
        let store = Arc::new(MemoryStateStore::new());
        store.set(CHAT_SESSIONS_NAMESPACE, b"{broken").unwrap();

        let service = SessionService::load(store);
        assert!(service.registry().is_empty());
    }
}
