//! Helpers shared by the support-thread use cases.

use clearflow_domain::ThreadReconciler;
use std::sync::Mutex;
use tracing::warn;

/// Run a closure over the locked thread state.
///
/// A poisoned lock (a panic while held) is logged and skipped instead of
/// propagating; thread state is display state, never worth crashing over.
pub(crate) fn with_thread<R>(
    thread: &Mutex<ThreadReconciler>,
    f: impl FnOnce(&mut ThreadReconciler) -> R,
) -> Option<R> {
    match thread.lock() {
        Ok(mut guard) => Some(f(&mut guard)),
        Err(_) => {
            warn!("Thread state lock poisoned; skipping update");
            None
        }
    }
}
