//! Remote endpoint ports
//!
//! Defines the interfaces for talking to the headless CMS backend and the
//! external assistant endpoint. Everything is JSON-over-HTTP with the
//! locale as a query dimension; adapters live in the infrastructure layer.

use async_trait::async_trait;
use clearflow_domain::{Locale, Product, ProductPage, Ticket};
use thiserror::Error;

/// Errors that can occur during remote gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Gateway for the product catalog.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Look up a single localized product by its slug.
    async fn product_by_slug(&self, slug: &str, locale: Locale) -> Result<Product, GatewayError>;

    /// Fetch one page of the localized product listing.
    async fn list_products(&self, locale: Locale, page: u32) -> Result<ProductPage, GatewayError>;
}

/// Gateway for support tickets.
#[async_trait]
pub trait SupportGateway: Send + Sync {
    /// Fetch a ticket with its full conversation.
    async fn fetch_ticket(&self, id: &str, locale: Locale) -> Result<Ticket, GatewayError>;

    /// Append a reply to a ticket's conversation.
    ///
    /// Returns the full refreshed ticket so the caller can replace local
    /// thread state wholesale.
    async fn send_reply(
        &self,
        id: &str,
        text: &str,
        locale: Locale,
    ) -> Result<Ticket, GatewayError>;
}

/// Gateway for the chat widget's assistant endpoint.
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    /// Ask the assistant for a reply to a user prompt.
    async fn reply(&self, prompt: &str, locale: Locale) -> Result<String, GatewayError>;
}
