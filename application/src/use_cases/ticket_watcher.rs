//! Ticket watcher: fixed-interval polling with count-based reconciliation.
//!
//! While a ticket is in a non-terminal status, the watcher fetches the
//! conversation on a fixed cadence and applies it to the thread state; the
//! [`ThreadReconciler`] decides whether anything actually changed. The loop
//! ends when the status becomes terminal or the owning view cancels it;
//! both paths drop the interval, so no timer outlives its view. A fetch
//! that completes after cancellation is discarded, never applied.

use crate::ports::gateways::SupportGateway;
use crate::ports::ticket_progress::TicketProgress;
use crate::use_cases::shared::with_thread;
use clearflow_domain::{Locale, ThreadReconciler, TicketStatus};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// How a watch loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEnd {
    /// The remote reported a terminal status; polling stopped.
    Terminal(TicketStatus),
    /// The owning view tore the watch down.
    Cancelled,
}

/// Polls one ticket and reconciles its thread state.
pub struct TicketWatcher {
    gateway: Arc<dyn SupportGateway>,
    poll_interval: Duration,
}

impl TicketWatcher {
    pub fn new(gateway: Arc<dyn SupportGateway>, poll_interval: Duration) -> Self {
        Self {
            gateway,
            poll_interval,
        }
    }

    /// Watch `ticket_id` until its status turns terminal or `cancel` fires.
    ///
    /// The first poll runs immediately; each successful poll reports the
    /// status through `progress` and, when the reconciler replaced local
    /// state, the refreshed thread. Poll failures are transient: they are
    /// reported and the loop keeps its cadence.
    pub async fn watch(
        &self,
        ticket_id: &str,
        locale: Locale,
        thread: Arc<Mutex<ThreadReconciler>>,
        cancel: CancellationToken,
        progress: &dyn TicketProgress,
    ) -> WatchEnd {
        let mut interval = tokio::time::interval(self.poll_interval);
        info!(
            "Watching ticket {} every {:?}",
            ticket_id, self.poll_interval
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Watch on ticket {} cancelled", ticket_id);
                    return WatchEnd::Cancelled;
                }
                _ = interval.tick() => {
                    let ticket = match self.gateway.fetch_ticket(ticket_id, locale).await {
                        Ok(ticket) => ticket,
                        Err(e) => {
                            progress.on_poll_error(&e);
                            continue;
                        }
                    };

                    // The view may have gone away while the fetch was in
                    // flight; a stale response must not touch its state.
                    if cancel.is_cancelled() {
                        debug!("Discarding stale poll response for ticket {}", ticket_id);
                        return WatchEnd::Cancelled;
                    }

                    let status = ticket.status;
                    let replaced = with_thread(&thread, |t| t.apply_remote(ticket.messages))
                        .unwrap_or(false);
                    if replaced
                        && let Some(messages) =
                            with_thread(&thread, |t| t.visible().cloned().collect::<Vec<_>>())
                    {
                        progress.on_thread_replaced(&messages);
                    }
                    progress.on_status(status);

                    if status.is_terminal() {
                        info!("Ticket {} reached terminal status; polling stops", ticket_id);
                        return WatchEnd::Terminal(status);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::gateways::GatewayError;
    use crate::ports::ticket_progress::NoTicketProgress;
    use async_trait::async_trait;
    use clearflow_domain::{ChatMessage, Ticket};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a scripted sequence of poll results, repeating the last one.
    struct ScriptedSupport {
        polls: Vec<Ticket>,
        cursor: AtomicUsize,
    }

    impl ScriptedSupport {
        fn new(polls: Vec<Ticket>) -> Self {
            Self {
                polls,
                cursor: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SupportGateway for ScriptedSupport {
        async fn fetch_ticket(&self, _id: &str, _locale: Locale) -> Result<Ticket, GatewayError> {
            let i = self.cursor.fetch_add(1, Ordering::SeqCst);
            Ok(self.polls[i.min(self.polls.len() - 1)].clone())
        }

        async fn send_reply(
            &self,
            _id: &str,
            _text: &str,
            _locale: Locale,
        ) -> Result<Ticket, GatewayError> {
            Err(GatewayError::RequestFailed("not used".to_string()))
        }
    }

    fn ticket(status: TicketStatus, messages: Vec<ChatMessage>) -> Ticket {
        Ticket {
            id: "t1".to_string(),
            subject: "leaky filter".to_string(),
            status,
            messages,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_stops_on_terminal_status() {
        let gateway = Arc::new(ScriptedSupport::new(vec![
            ticket(TicketStatus::Open, vec![ChatMessage::user("r1", "help")]),
            ticket(
                TicketStatus::Closed,
                vec![
                    ChatMessage::user("r1", "help"),
                    ChatMessage::assistant("r2", "resolved"),
                ],
            ),
        ]));
        let watcher = TicketWatcher::new(gateway, Duration::from_secs(5));
        let thread = Arc::new(Mutex::new(ThreadReconciler::new()));

        let end = watcher
            .watch(
                "t1",
                Locale::En,
                thread.clone(),
                CancellationToken::new(),
                &NoTicketProgress,
            )
            .await;

        assert_eq!(end, WatchEnd::Terminal(TicketStatus::Closed));
        assert_eq!(thread.lock().unwrap().visible().count(), 2);
        assert_eq!(thread.lock().unwrap().last_known_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_reconciles_overlay_discard() {
        let gateway = Arc::new(ScriptedSupport::new(vec![ticket(
            TicketStatus::Closed,
            vec![ChatMessage::assistant("r1", "hello")],
        )]));
        let watcher = TicketWatcher::new(gateway, Duration::from_secs(5));
        let thread = Arc::new(Mutex::new(ThreadReconciler::new()));
        thread
            .lock()
            .unwrap()
            .push_optimistic(ChatMessage::user("local-1", "unconfirmed"));

        watcher
            .watch(
                "t1",
                Locale::En,
                thread.clone(),
                CancellationToken::new(),
                &NoTicketProgress,
            )
            .await;

        // Remote count (1) differed from last known (0): overlay discarded.
        let guard = thread.lock().unwrap();
        assert_eq!(guard.overlay_len(), 0);
        let texts: Vec<_> = guard.visible().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["hello"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_watch_applies_nothing_more() {
        let gateway = Arc::new(ScriptedSupport::new(vec![ticket(TicketStatus::Open, vec![])]));
        let watcher = TicketWatcher::new(gateway, Duration::from_secs(5));
        let thread = Arc::new(Mutex::new(ThreadReconciler::new()));

        let cancel = CancellationToken::new();
        cancel.cancel();

        let end = watcher
            .watch(
                "t1",
                Locale::En,
                thread.clone(),
                cancel,
                &NoTicketProgress,
            )
            .await;

        assert_eq!(end, WatchEnd::Cancelled);
        assert_eq!(thread.lock().unwrap().visible().count(), 0);
    }

    /// Fails every poll; the loop must keep polling, not bail.
    struct FlakySupport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SupportGateway for FlakySupport {
        async fn fetch_ticket(&self, _id: &str, _locale: Locale) -> Result<Ticket, GatewayError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(GatewayError::ConnectionError("timeout".to_string()))
            } else {
                Ok(ticket(TicketStatus::Closed, vec![]))
            }
        }

        async fn send_reply(
            &self,
            _id: &str,
            _text: &str,
            _locale: Locale,
        ) -> Result<Ticket, GatewayError> {
            Err(GatewayError::RequestFailed("not used".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_errors_are_transient() {
        let gateway = Arc::new(FlakySupport {
            calls: AtomicUsize::new(0),
        });
        let watcher = TicketWatcher::new(gateway.clone(), Duration::from_secs(5));
        let thread = Arc::new(Mutex::new(ThreadReconciler::new()));

        let end = watcher
            .watch(
                "t1",
                Locale::En,
                thread,
                CancellationToken::new(),
                &NoTicketProgress,
            )
            .await;

        assert_eq!(end, WatchEnd::Terminal(TicketStatus::Closed));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 3);
    }
}
