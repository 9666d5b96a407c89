//! Wire types for the headless CMS API.
//!
//! The backend wraps payloads in a `data` envelope and serves camelCase
//! fields; entries carry a numeric row `id` plus a `documentId` that is
//! stable across locale variants. Mapping into domain types attaches the
//! client-observed timestamp to each message, since the API carries none.

use super::error::CmsError;
use clearflow_domain::{
    ChatMessage, CurrencyMode, Locale, MessageRole, Product, ProductPage, Ticket, TicketStatus,
};
use serde::Deserialize;

/// Single-entity envelope: `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Collection envelope with pagination metadata.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    pub meta: MetaDto,
}

#[derive(Debug, Deserialize)]
pub struct MetaDto {
    pub pagination: PaginationDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub page: u32,
    pub page_count: u32,
    pub total: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub document_id: Option<String>,
    pub slug: String,
    pub name: String,
    pub price: f64,
    pub category: Option<CategoryDto>,
    pub image: Option<ImageDto>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryDto {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageDto {
    pub url: String,
}

impl ProductDto {
    pub fn into_domain(self, locale: Locale) -> Product {
        Product {
            row_id: self.id.to_string(),
            document_id: self.document_id,
            slug: self.slug,
            name: self.name,
            price: self.price,
            category: self.category.map(|c| c.name).unwrap_or_default(),
            image: self.image.map(|i| i.url),
            currency: currency_for(locale),
            locale,
        }
    }
}

/// Currency the backend denominates each locale's prices in.
fn currency_for(locale: Locale) -> CurrencyMode {
    match locale {
        Locale::En => CurrencyMode::Usd,
        Locale::Ar => CurrencyMode::Aed,
    }
}

pub fn map_page(list: ListEnvelope<ProductDto>, locale: Locale) -> ProductPage {
    ProductPage {
        products: list
            .data
            .into_iter()
            .map(|p| p.into_domain(locale))
            .collect(),
        page: list.meta.pagination.page,
        page_count: list.meta.pagination.page_count,
        total: list.meta.pagination.total,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    pub id: i64,
    pub document_id: Option<String>,
    pub subject: String,
    pub status: String,
    #[serde(default)]
    pub messages: Vec<TicketMessageDto>,
}

#[derive(Debug, Deserialize)]
pub struct TicketMessageDto {
    pub id: i64,
    pub role: MessageRole,
    pub text: String,
}

impl TicketDto {
    /// Map to the domain ticket, stamping `observed_at` on every message.
    ///
    /// An unknown status string is a payload error; better to skip a poll
    /// than to guess at thread lifecycle.
    pub fn into_domain(self) -> Result<Ticket, CmsError> {
        let status: TicketStatus = self
            .status
            .parse()
            .map_err(|e: clearflow_domain::DomainError| CmsError::InvalidPayload(e.to_string()))?;
        let id = self.document_id.unwrap_or_else(|| self.id.to_string());
        Ok(Ticket {
            id,
            subject: self.subject,
            status,
            messages: self
                .messages
                .into_iter()
                .map(|m| ChatMessage::new(m.id.to_string(), m.role, m.text))
                .collect(),
        })
    }
}

/// Assistant endpoint response.
#[derive(Debug, Deserialize)]
pub struct AssistantReplyDto {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_page_maps_from_wire_form() {
        let json = r#"{
            "data": [{
                "id": 7,
                "documentId": "P1",
                "slug": "filter-x",
                "name": "Filter X",
                "price": 25.0,
                "category": { "name": "Under-sink filters" },
                "image": { "url": "/uploads/filter-x.webp" }
            }],
            "meta": { "pagination": { "page": 1, "pageCount": 3, "total": 41 } }
        }"#;

        let list: ListEnvelope<ProductDto> = serde_json::from_str(json).unwrap();
        let page = map_page(list, Locale::En);

        assert_eq!(page.total, 41);
        let p = &page.products[0];
        assert_eq!(p.row_id, "7");
        assert_eq!(p.identity(), "P1");
        assert_eq!(p.currency, CurrencyMode::Usd);
        assert_eq!(p.image.as_deref(), Some("/uploads/filter-x.webp"));
    }

    #[test]
    fn test_product_without_optional_fields() {
        let json = r#"{
            "id": 9,
            "slug": "filter-y",
            "name": "Filter Y",
            "price": 40.0
        }"#;
        let dto: ProductDto = serde_json::from_str(json).unwrap();
        let p = dto.into_domain(Locale::Ar);

        assert_eq!(p.identity(), "9");
        assert_eq!(p.category, "");
        assert_eq!(p.currency, CurrencyMode::Aed);
    }

    #[test]
    fn test_ticket_maps_and_stamps_observed_at() {
        let json = r#"{
            "id": 3,
            "documentId": "T3",
            "subject": "leaky filter",
            "status": "awaiting-reply",
            "messages": [
                { "id": 1, "role": "user", "text": "it drips" },
                { "id": 2, "role": "assistant", "text": "checking" }
            ]
        }"#;
        let ticket = serde_json::from_str::<TicketDto>(json)
            .unwrap()
            .into_domain()
            .unwrap();

        assert_eq!(ticket.id, "T3");
        assert_eq!(ticket.status, TicketStatus::AwaitingReply);
        assert_eq!(ticket.messages.len(), 2);
        assert_eq!(ticket.messages[0].role, MessageRole::User);
    }

    #[test]
    fn test_unknown_status_is_payload_error() {
        let json = r#"{ "id": 3, "subject": "x", "status": "archived" }"#;
        let result = serde_json::from_str::<TicketDto>(json).unwrap().into_domain();
        assert!(matches!(result, Err(CmsError::InvalidPayload(_))));
    }
}
