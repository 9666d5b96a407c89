//! Durable persistence adapters.

pub mod json_store;

pub use json_store::JsonFileStore;
