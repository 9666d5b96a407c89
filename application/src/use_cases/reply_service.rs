//! Reply use case: optimistic send against a support ticket.
//!
//! The reply appears in the thread immediately as an optimistic overlay
//! entry, then the remote write runs. Success replaces the whole thread
//! from the response; failure rolls back only the entry tied to this send.

use crate::ports::gateways::{GatewayError, SupportGateway};
use crate::use_cases::shared::with_thread;
use chrono::Utc;
use clearflow_domain::{ChatMessage, Locale, ThreadReconciler, TicketStatus};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when sending a reply.
#[derive(Error, Debug)]
pub enum ReplyError {
    #[error("Ticket is closed")]
    TicketClosed,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Sends ticket replies with optimistic thread updates.
pub struct ReplyService {
    gateway: Arc<dyn SupportGateway>,
}

impl ReplyService {
    pub fn new(gateway: Arc<dyn SupportGateway>) -> Self {
        Self { gateway }
    }

    /// Append a reply to `ticket_id`, reconciling `thread` along the way.
    ///
    /// `current_status` gates the composer: replies to a terminal ticket
    /// are rejected before anything is recorded. Returns the refreshed
    /// status from the response.
    pub async fn send(
        &self,
        ticket_id: &str,
        text: &str,
        current_status: TicketStatus,
        locale: Locale,
        thread: &Mutex<ThreadReconciler>,
    ) -> Result<TicketStatus, ReplyError> {
        if current_status.is_terminal() {
            return Err(ReplyError::TicketClosed);
        }

        let local_id = format!("local-{}", Utc::now().timestamp_millis());
        with_thread(thread, |t| {
            t.push_optimistic(ChatMessage::user(local_id.clone(), text));
        });

        match self.gateway.send_reply(ticket_id, text, locale).await {
            Ok(ticket) => {
                debug!(
                    "Reply confirmed on ticket {}: {} messages",
                    ticket_id,
                    ticket.messages.len()
                );
                with_thread(thread, |t| t.confirm_send(ticket.messages));
                Ok(ticket.status)
            }
            Err(e) => {
                warn!("Reply to ticket {} failed: {}", ticket_id, e);
                with_thread(thread, |t| t.fail_send(&local_id));
                Err(ReplyError::Gateway(e))
            }
        }
    }
}
