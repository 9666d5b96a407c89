//! Domain layer for clearflow
//!
//! This crate contains the storefront client's state cores: the shopping
//! cart and the support session registry, plus the catalog entities they
//! snapshot from. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Cart
//!
//! [`cart::CartState`] holds line items keyed by a locale-stable identity
//! and keeps its cached totals equal to the recomputed sums after every
//! mutation. Persistence is layered on by the application layer.
//!
//! ## Support sessions
//!
//! [`support::SessionRegistry`] manages the chat widget's conversation
//! threads; [`support::ThreadReconciler`] reconciles optimistic local sends
//! against the polled, authoritative remote conversation.

pub mod cart;
pub mod catalog;
pub mod core;
pub mod support;

// Re-export commonly used types
pub use cart::{CartLine, CartLinePatch, CartState};
pub use catalog::{Product, ProductPage};
pub use crate::core::{
    error::DomainError,
    locale::{CurrencyMode, Locale, TextDirection},
    string::ellipsize,
};
pub use support::{
    ChatMessage, ChatSession, MessageRole, ReconcileState, SessionRegistry, ThreadReconciler,
    Ticket, TicketStatus,
};
