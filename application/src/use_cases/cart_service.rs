//! Cart service: durable wrapper around the cart state core.
//!
//! Loads the persisted snapshot on construction and writes the full state
//! back after every mutation. The transition logic itself lives in
//! [`CartState`] and stays persistence-agnostic; this wrapper only adds the
//! "load on construct, save after mutation" behavior.
//!
//! A persistence failure never blocks the in-memory transition: the cart
//! stays correct for the current run and the failure is logged.

use crate::ports::gateways::CatalogGateway;
use crate::ports::state_store::{CART_NAMESPACE, StateStore};
use clearflow_domain::{CartLinePatch, CartState, Locale, Product};
use std::sync::Arc;
use tracing::{debug, warn};

/// The client's cart, backed by a [`StateStore`] under the `cart` namespace.
pub struct CartService {
    cart: CartState,
    store: Arc<dyn StateStore>,
}

impl CartService {
    /// Construct from the persisted snapshot, or empty when none exists.
    ///
    /// An unreadable snapshot is discarded with a warning rather than
    /// failing; a corrupt store must never take the cart down.
    pub fn load(store: Arc<dyn StateStore>) -> Self {
        let cart = match store.get(CART_NAMESPACE) {
            Ok(Some(bytes)) => match serde_json::from_slice::<CartState>(&bytes) {
                Ok(snapshot) => snapshot.rehydrate(),
                Err(e) => {
                    warn!("Discarding unreadable cart snapshot: {}", e);
                    CartState::new()
                }
            },
            Ok(None) => CartState::new(),
            Err(e) => {
                warn!("Could not read persisted cart: {}", e);
                CartState::new()
            }
        };
        debug!(
            "Cart loaded: {} lines, {} items",
            cart.lines().len(),
            cart.total_items()
        );
        Self { cart, store }
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn add_item(&mut self, product: &Product, quantity_delta: u32) {
        self.cart.add_item(product, quantity_delta);
        self.persist();
    }

    pub fn remove_item(&mut self, id: &str) {
        self.cart.remove_item(id);
        self.persist();
    }

    pub fn update_quantity(&mut self, id: &str, new_quantity: u32) {
        self.cart.update_quantity(id, new_quantity);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    pub fn refresh_item(&mut self, id: &str, patch: CartLinePatch) {
        self.cart.refresh_item(id, patch);
        self.persist();
    }

    /// Re-localize every line's snapshot after a locale switch.
    ///
    /// Each line's product is re-fetched by slug in the new locale (all
    /// lookups run concurrently) and its snapshot fields refreshed;
    /// quantities are untouched. Lines whose product no longer resolves are
    /// left as they were.
    pub async fn relocalize(&mut self, gateway: &dyn CatalogGateway, locale: Locale) {
        let targets: Vec<(String, String)> = self
            .cart
            .lines()
            .iter()
            .map(|line| (line.id.clone(), line.slug.clone()))
            .collect();

        let fetches = targets
            .iter()
            .map(|(_, slug)| gateway.product_by_slug(slug, locale));
        let results = futures::future::join_all(fetches).await;

        for ((id, slug), result) in targets.iter().zip(results) {
            match result {
                Ok(product) => {
                    self.cart.refresh_item(id, CartLinePatch::from_product(&product));
                }
                Err(e) => {
                    warn!("Keeping stale snapshot for '{}': {}", slug, e);
                }
            }
        }
        self.persist();
    }

    fn persist(&self) {
        let bytes = match serde_json::to_vec(&self.cart) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Could not serialize cart: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(CART_NAMESPACE, &bytes) {
            warn!("Could not persist cart: {}", e);
        }
    }
}
