//! Optimistic-send reconciliation for an externally-tracked thread.
//!
//! A [`ThreadReconciler`] tracks one conversation that the remote source
//! owns. Locally-sent messages land in a transient overlay immediately; the
//! polled remote list is authoritative and replaces everything when its
//! message count moves. The explicit state enum makes the discard/rollback
//! rules auditable instead of burying them in ad hoc flags.

use super::entities::ChatMessage;

/// Reconciliation state of a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcileState {
    /// Nothing speculative outstanding.
    #[default]
    Idle,
    /// At least one optimistic entry awaits remote confirmation.
    OptimisticPending,
    /// The last remote fetch replaced local state.
    Reconciled,
    /// The last send failed; its entry was rolled back.
    Failed,
}

/// Confirmed messages plus the optimistic overlay for one thread.
#[derive(Debug, Clone, Default)]
pub struct ThreadReconciler {
    confirmed: Vec<ChatMessage>,
    overlay: Vec<ChatMessage>,
    last_known_count: usize,
    state: ReconcileState,
}

impl ThreadReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ReconcileState {
        self.state
    }

    pub fn last_known_count(&self) -> usize {
        self.last_known_count
    }

    /// Messages to display: confirmed history followed by unconfirmed sends.
    pub fn visible(&self) -> impl Iterator<Item = &ChatMessage> {
        self.confirmed.iter().chain(self.overlay.iter())
    }

    pub fn overlay_len(&self) -> usize {
        self.overlay.len()
    }

    /// Record a locally-sent message before the remote write completes.
    pub fn push_optimistic(&mut self, message: ChatMessage) {
        self.overlay.push(message);
        self.state = ReconcileState::OptimisticPending;
    }

    /// Apply a polled remote snapshot.
    ///
    /// When the remote count differs from the last known count the remote
    /// list replaces the confirmed history wholesale and the entire overlay
    /// is discarded, even entries the remote has not echoed back yet; the
    /// remote is authoritative. Equal counts change nothing, so callers can
    /// skip redundant re-renders. Returns whether state was replaced.
    pub fn apply_remote(&mut self, messages: Vec<ChatMessage>) -> bool {
        if messages.len() == self.last_known_count {
            return false;
        }
        self.last_known_count = messages.len();
        self.confirmed = messages;
        self.overlay.clear();
        self.state = ReconcileState::Reconciled;
        true
    }

    /// A send succeeded: the response carries the full refreshed thread,
    /// which replaces local state and clears the overlay.
    pub fn confirm_send(&mut self, messages: Vec<ChatMessage>) {
        self.last_known_count = messages.len();
        self.confirmed = messages;
        self.overlay.clear();
        self.state = ReconcileState::Reconciled;
    }

    /// A send failed: roll back only the entry tied to that send, leaving
    /// any other optimistic messages untouched.
    pub fn fail_send(&mut self, message_id: &str) {
        self.overlay.retain(|m| m.id != message_id);
        self.state = ReconcileState::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::entities::MessageRole;

    fn msg(id: &str, role: MessageRole, text: &str) -> ChatMessage {
        ChatMessage::new(id, role, text)
    }

    #[test]
    fn test_push_optimistic_is_visible_and_pending() {
        let mut thread = ThreadReconciler::new();
        thread.push_optimistic(msg("m1", MessageRole::User, "help"));

        assert_eq!(thread.state(), ReconcileState::OptimisticPending);
        let texts: Vec<_> = thread.visible().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["help"]);
    }

    #[test]
    fn test_apply_remote_discards_overlay_on_count_change() {
        let mut thread = ThreadReconciler::new();
        thread.push_optimistic(msg("local-1", MessageRole::User, "unconfirmed"));

        // Remote returns a list whose count (1) differs from last known (0);
        // the overlay is discarded even though its content was never echoed.
        let replaced = thread.apply_remote(vec![msg("r1", MessageRole::Assistant, "hello")]);

        assert!(replaced);
        assert_eq!(thread.state(), ReconcileState::Reconciled);
        assert_eq!(thread.overlay_len(), 0);
        let texts: Vec<_> = thread.visible().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["hello"]);
    }

    #[test]
    fn test_apply_remote_equal_count_is_noop() {
        let mut thread = ThreadReconciler::new();
        thread.confirm_send(vec![msg("r1", MessageRole::Assistant, "hello")]);
        thread.push_optimistic(msg("local-1", MessageRole::User, "pending"));

        // Same count as last known: no replacement, overlay survives.
        let replaced = thread.apply_remote(vec![msg("r1", MessageRole::Assistant, "hello")]);

        assert!(!replaced);
        assert_eq!(thread.overlay_len(), 1);
        assert_eq!(thread.visible().count(), 2);
    }

    #[test]
    fn test_confirm_send_replaces_thread() {
        let mut thread = ThreadReconciler::new();
        thread.push_optimistic(msg("local-1", MessageRole::User, "help"));

        thread.confirm_send(vec![
            msg("r1", MessageRole::User, "help"),
            msg("r2", MessageRole::Assistant, "on it"),
        ]);

        assert_eq!(thread.state(), ReconcileState::Reconciled);
        assert_eq!(thread.last_known_count(), 2);
        assert_eq!(thread.overlay_len(), 0);
    }

    #[test]
    fn test_fail_send_removes_only_failed_entry() {
        let mut thread = ThreadReconciler::new();
        thread.push_optimistic(msg("local-1", MessageRole::User, "first"));
        thread.push_optimistic(msg("local-2", MessageRole::User, "second"));

        thread.fail_send("local-1");

        assert_eq!(thread.state(), ReconcileState::Failed);
        let ids: Vec<_> = thread.visible().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["local-2"]);
    }
}
