//! Port for ticket watch progress callbacks.
//!
//! The poll loop in [`TicketWatcher`](crate::use_cases::ticket_watcher)
//! reports through this port instead of rendering anything itself, keeping
//! the loop testable without a UI.

use super::gateways::GatewayError;
use clearflow_domain::{ChatMessage, TicketStatus};

/// Callbacks emitted while watching a ticket.
pub trait TicketProgress: Send + Sync {
    /// The remote reported this status on the latest poll.
    fn on_status(&self, status: TicketStatus);

    /// The remote conversation replaced local thread state.
    fn on_thread_replaced(&self, messages: &[ChatMessage]);

    /// A poll failed; the loop continues at the next tick.
    fn on_poll_error(&self, error: &GatewayError);
}

/// No-op implementation for tests and headless runs.
pub struct NoTicketProgress;

impl TicketProgress for NoTicketProgress {
    fn on_status(&self, _status: TicketStatus) {}
    fn on_thread_replaced(&self, _messages: &[ChatMessage]) {}
    fn on_poll_error(&self, _error: &GatewayError) {}
}
