//! HTTP client for the headless CMS backend.
//!
//! Implements the catalog, support, and assistant gateways over a uniform
//! JSON-over-HTTP convention: every call carries `locale` as a query
//! parameter, non-2xx responses surface as [`CmsError::Http`] with the body
//! as the message.

use super::dto::{
    AssistantReplyDto, Envelope, ListEnvelope, ProductDto, TicketDto, map_page,
};
use super::error::{CmsError, Result};
use async_trait::async_trait;
use clearflow_application::{AssistantGateway, CatalogGateway, GatewayError, SupportGateway};
use clearflow_domain::{Locale, Product, ProductPage, Ticket};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Longest error body echoed into an error message.
const MAX_ERROR_BODY: usize = 200;

/// CMS API client.
pub struct CmsClient {
    client: reqwest::Client,
    base_url: String,
}

impl CmsClient {
    /// Build a client against `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("clearflow/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, locale: Locale) -> Result<T> {
        let url = self.url(path);
        debug!("GET {} locale={}", url, locale);
        let response = self
            .client
            .get(&url)
            .query(&[("locale", locale.as_str())])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        locale: Locale,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!("POST {} locale={}", url, locale);
        let response = self
            .client
            .post(&url)
            .query(&[("locale", locale.as_str())])
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            message.truncate(MAX_ERROR_BODY);
            return Err(CmsError::Http {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| CmsError::InvalidPayload(e.to_string()))
    }
}

#[async_trait]
impl CatalogGateway for CmsClient {
    async fn product_by_slug(
        &self,
        slug: &str,
        locale: Locale,
    ) -> std::result::Result<Product, GatewayError> {
        let envelope: Envelope<ProductDto> = self
            .get_json(&format!("/api/products/{}", slug), locale)
            .await?;
        Ok(envelope.data.into_domain(locale))
    }

    async fn list_products(
        &self,
        locale: Locale,
        page: u32,
    ) -> std::result::Result<ProductPage, GatewayError> {
        let list: ListEnvelope<ProductDto> = self
            .get_json(&format!("/api/products?page={}", page), locale)
            .await?;
        Ok(map_page(list, locale))
    }
}

#[async_trait]
impl SupportGateway for CmsClient {
    async fn fetch_ticket(
        &self,
        id: &str,
        locale: Locale,
    ) -> std::result::Result<Ticket, GatewayError> {
        let envelope: Envelope<TicketDto> = self
            .get_json(&format!("/api/tickets/{}", id), locale)
            .await?;
        Ok(envelope.data.into_domain()?)
    }

    async fn send_reply(
        &self,
        id: &str,
        text: &str,
        locale: Locale,
    ) -> std::result::Result<Ticket, GatewayError> {
        let body = serde_json::json!({ "text": text });
        let envelope: Envelope<TicketDto> = self
            .post_json(&format!("/api/tickets/{}/replies", id), locale, &body)
            .await?;
        Ok(envelope.data.into_domain()?)
    }
}

#[async_trait]
impl AssistantGateway for CmsClient {
    async fn reply(
        &self,
        prompt: &str,
        locale: Locale,
    ) -> std::result::Result<String, GatewayError> {
        let body = serde_json::json!({ "prompt": prompt });
        let reply: AssistantReplyDto = self.post_json("/api/assistant", locale, &body).await?;
        Ok(reply.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = CmsClient::new("http://localhost:1337/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1337");
        assert_eq!(
            client.url("/api/products/filter-x"),
            "http://localhost:1337/api/products/filter-x"
        );
    }
}
