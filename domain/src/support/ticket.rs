//! Support ticket entities and status state machine.

use super::entities::ChatMessage;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status of an externally-tracked support thread.
///
/// Transitions are driven entirely by the remote source:
/// `open → (awaiting-reply | replied)* → closed`. The local store never
/// changes status itself. `Closed` is terminal: polling stops and the
/// reply composer is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    Open,
    AwaitingReply,
    Replied,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::AwaitingReply => "awaiting-reply",
            TicketStatus::Replied => "replied",
            TicketStatus::Closed => "closed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Closed)
    }
}

impl FromStr for TicketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "awaiting-reply" => Ok(TicketStatus::AwaitingReply),
            "replied" => Ok(TicketStatus::Replied),
            "closed" => Ok(TicketStatus::Closed),
            other => Err(DomainError::UnknownTicketStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A support ticket with its conversation, as served by the backend (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub status: TicketStatus,
    pub messages: Vec<ChatMessage>,
}
