//! Support session core: chat sessions, tickets, optimistic reconciliation.

pub mod entities;
pub mod reconcile;
pub mod registry;
pub mod ticket;

pub use entities::{ChatMessage, ChatSession, MessageRole};
pub use reconcile::{ReconcileState, ThreadReconciler};
pub use registry::SessionRegistry;
pub use ticket::{Ticket, TicketStatus};
