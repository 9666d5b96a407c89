//! Application use cases
//!
//! Each use case wires domain state cores to the ports, keeping the
//! transition logic itself free of persistence and transport concerns.

pub mod cart_service;
pub mod chat_service;
pub mod reply_service;
pub mod session_service;
mod shared;
pub mod ticket_watcher;
