//! Cart state transitions.
//!
//! [`CartState`] is the single source of truth for the client's cart. Every
//! mutation is a synchronous read-modify-write that leaves the cached totals
//! equal to the recomputed sums. The totals are projections of `lines`,
//! never independent state. Persistence is layered on top by the application
//! layer; the transitions here are storage-agnostic.

use super::entities::{CartLine, CartLinePatch};
use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// The shopping cart: line items plus cached aggregate projections.
///
/// Insertion order of `lines` is preserved for display; correctness only
/// depends on the `id` key. None of the operations fail; invalid input is
/// a defensive no-op.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    lines: Vec<CartLine>,
    total_items: u32,
    total_price: f64,
}

impl CartState {
    /// Empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from a persisted snapshot.
    ///
    /// Totals are recomputed from the lines so a stale or hand-edited
    /// snapshot can never introduce drift between lines and projections.
    pub fn rehydrate(mut self) -> Self {
        self.lines.retain(|line| line.quantity >= 1);
        self.recompute();
        self
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    /// Sum of all line totals.
    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Add a product to the cart, merging by resolved identity.
    ///
    /// An existing line keeps its snapshot fields and gains `quantity_delta`;
    /// otherwise a new line snapshots the product. Deltas below 1 are
    /// clamped to 1 so a line can never enter below the quantity floor.
    pub fn add_item(&mut self, product: &Product, quantity_delta: u32) {
        let delta = quantity_delta.max(1);
        let id = product.identity();
        match self.lines.iter_mut().find(|line| line.id == id) {
            Some(line) => line.quantity += delta,
            None => self.lines.push(CartLine::from_product(product, delta)),
        }
        self.recompute();
    }

    /// Remove the line matching `id`. Absent id is a no-op, not an error.
    pub fn remove_item(&mut self, id: &str) {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        if self.lines.len() != before {
            self.recompute();
        }
    }

    /// Set a line's quantity to an absolute value.
    ///
    /// Rejected as a no-op when `new_quantity < 1`; deletion goes through
    /// [`remove_item`](Self::remove_item), not a zero quantity.
    pub fn update_quantity(&mut self, id: &str, new_quantity: u32) {
        if new_quantity < 1 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == id) {
            line.quantity = new_quantity;
            self.recompute();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute();
    }

    /// Apply a partial snapshot update to the matching line.
    ///
    /// Quantity is untouched. `total_price` is recomputed only when the
    /// patch carries a price.
    pub fn refresh_item(&mut self, id: &str, patch: CartLinePatch) {
        let Some(line) = self.lines.iter_mut().find(|line| line.id == id) else {
            return;
        };
        let price_changed = patch.has_price();
        if let Some(name) = patch.display_name {
            line.display_name = name;
        }
        if let Some(category) = patch.category_label {
            line.category_label = category;
        }
        if let Some(image) = patch.image_ref {
            line.image_ref = image;
        }
        if let Some(price) = patch.unit_price {
            line.unit_price = price;
        }
        if let Some(currency) = patch.currency {
            line.currency = currency;
        }
        if price_changed {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.total_items = self.lines.iter().map(|line| line.quantity).sum();
        self.total_price = self.lines.iter().map(|line| line.line_total()).sum();
    }
}
