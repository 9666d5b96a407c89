//! Cart domain entities

use crate::catalog::Product;
use crate::core::locale::CurrencyMode;
use serde::{Deserialize, Serialize};

/// One product's presence in the cart (Entity)
///
/// All presentation fields are snapshots captured at add time; they are not
/// re-fetched when the source product changes. A line's quantity is never
/// below 1; "not in cart" is represented by removing the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Resolved identity key (document id when present, row id otherwise)
    pub id: String,
    /// Product slug snapshot, kept so the line can be re-localized later
    pub slug: String,
    pub quantity: u32,
    /// Unit price snapshot, non-negative
    pub unit_price: f64,
    pub display_name: String,
    pub category_label: String,
    pub image_ref: Option<String>,
    pub currency: CurrencyMode,
}

impl CartLine {
    /// Snapshot a product into a fresh line.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.identity().to_string(),
            slug: product.slug.clone(),
            quantity,
            unit_price: product.price,
            display_name: product.name.clone(),
            category_label: product.category.clone(),
            image_ref: product.image.clone(),
            currency: product.currency,
        }
    }

    /// Derived line total; never stored.
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Partial snapshot update applied by [`CartState::refresh_item`].
///
/// Used when the UI locale changes after items were added in a different
/// locale: the freshly-localized product fields replace the stale snapshot
/// without touching the quantity.
#[derive(Debug, Clone, Default)]
pub struct CartLinePatch {
    pub display_name: Option<String>,
    pub category_label: Option<String>,
    pub image_ref: Option<Option<String>>,
    pub unit_price: Option<f64>,
    pub currency: Option<CurrencyMode>,
}

impl CartLinePatch {
    /// Build a patch carrying every snapshot field of a localized product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            display_name: Some(product.name.clone()),
            category_label: Some(product.category.clone()),
            image_ref: Some(product.image.clone()),
            unit_price: Some(product.price),
            currency: Some(product.currency),
        }
    }

    pub fn has_price(&self) -> bool {
        self.unit_price.is_some()
    }
}
