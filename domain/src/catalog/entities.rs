//! Catalog domain entities

use crate::core::locale::{CurrencyMode, Locale};
use serde::{Deserialize, Serialize};

/// A localized product as served by the catalog backend (Entity)
///
/// The same physical product exists once per locale; `document_id` is the
/// identifier that is stable across those variants, while `row_id` is unique
/// to a single localized row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Row-level identifier, unique per localized variant
    pub row_id: String,
    /// Document-level identifier, stable across locale variants
    pub document_id: Option<String>,
    /// URL slug used for lookups
    pub slug: String,
    /// Localized display name
    pub name: String,
    /// Price in the locale's currency, already denominated by the backend
    pub price: f64,
    /// Localized category label
    pub category: String,
    /// Primary image reference, if any
    pub image: Option<String>,
    /// Currency display mode for this locale
    pub currency: CurrencyMode,
    /// Locale this variant was fetched for
    pub locale: Locale,
}

impl Product {
    /// Identity key used by the cart.
    ///
    /// Prefers the document-level identifier so the same product added from
    /// two locales merges into one line; falls back to the row identifier.
    pub fn identity(&self) -> &str {
        self.document_id.as_deref().unwrap_or(&self.row_id)
    }
}

/// One page of a paginated product listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub page: u32,
    pub page_count: u32,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(document_id: Option<&str>, row_id: &str) -> Product {
        Product {
            row_id: row_id.to_string(),
            document_id: document_id.map(|s| s.to_string()),
            slug: "filter-x".to_string(),
            name: "Filter X".to_string(),
            price: 25.0,
            category: "Filters".to_string(),
            image: None,
            currency: CurrencyMode::Usd,
            locale: Locale::En,
        }
    }

    #[test]
    fn test_identity_prefers_document_id() {
        let p = product(Some("P1"), "row1");
        assert_eq!(p.identity(), "P1");
    }

    #[test]
    fn test_identity_falls_back_to_row_id() {
        let p = product(None, "row1");
        assert_eq!(p.identity(), "row1");
    }
}
