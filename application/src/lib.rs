//! Application layer for clearflow
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SupportParams;
pub use ports::{
    gateways::{AssistantGateway, CatalogGateway, GatewayError, SupportGateway},
    state_store::{
        CART_NAMESPACE, CHAT_SESSIONS_NAMESPACE, LOCALE_NAMESPACE, MemoryStateStore,
        NullStateStore, StateStore, StoreError,
    },
    ticket_progress::{NoTicketProgress, TicketProgress},
};
pub use use_cases::{
    cart_service::CartService,
    chat_service::ChatService,
    reply_service::{ReplyError, ReplyService},
    session_service::SessionService,
    ticket_watcher::{TicketWatcher, WatchEnd},
};
