//! Port for durable key-value persistence.
//!
//! Defines the [`StateStore`] trait the stores persist through: an opaque
//! byte snapshot per fixed namespace string. Adapters live in the
//! infrastructure layer (a JSON file per namespace on desktop).
//!
//! Persistence is best-effort by design: a failed write is logged by the
//! caller and never blocks the in-memory state transition.

use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// Namespace for the persisted cart snapshot.
pub const CART_NAMESPACE: &str = "cart";
/// Namespace for the persisted chat session list.
pub const CHAT_SESSIONS_NAMESPACE: &str = "chat-sessions";
/// Namespace for the persisted locale preference.
pub const LOCALE_NAMESPACE: &str = "locale";

/// Errors that can occur during persistence operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}

/// Durable key-value persistence scoped by namespace.
///
/// `get` returns the last snapshot written under the namespace, or `None`
/// when nothing was ever written. Concurrent writers (two processes sharing
/// the same backing store) resolve as last-writer-wins; the stores accept
/// that limitation.
pub trait StateStore: Send + Sync {
    fn get(&self, namespace: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn set(&self, namespace: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

/// No-op implementation for ephemeral runs and tests that don't care about
/// persistence. Reads are always empty, writes are discarded.
pub struct NullStateStore;

impl StateStore for NullStateStore {
    fn get(&self, _namespace: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(None)
    }

    fn set(&self, _namespace: &str, _bytes: &[u8]) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-memory implementation backing unit tests and previews.
#[derive(Default)]
pub struct MemoryStateStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, namespace: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        Ok(entries.get(namespace).cloned())
    }

    fn set(&self, namespace: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        entries.insert(namespace.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_store_reads_nothing() {
        let store = NullStateStore;
        store.set("cart", b"data").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStateStore::new();
        assert_eq!(store.get("cart").unwrap(), None);

        store.set("cart", b"snapshot").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some(&b"snapshot"[..]));

        // Namespaces are independent
        assert_eq!(store.get("chat-sessions").unwrap(), None);
    }
}
