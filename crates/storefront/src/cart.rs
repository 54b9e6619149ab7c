//! Shopping cart with write-through persistence.
//!
//! The in-memory cart is the source of truth. It is loaded from the `cart`
//! slot once at startup and the whole cart is written back after every
//! mutation; the slot is never re-read during a session.
//!
//! Cart lines copy the product's fields at the time of the first add, so a
//! later catalog refresh never changes the price or title of a line.

use std::num::IntErrorKind;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use technova_core::{ProductId, SHIPPING_SURCHARGE};

use crate::catalog::{Catalog, Product};
use crate::storage::{KeyValueStore, Slot, StorageError, load_json_records, save_json};

/// Errors that can occur when changing the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product is not in the catalog.
    #[error("Product {0} not found")]
    NotFound(ProductId),

    /// Quantity input is not a whole number in range.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// The cart changed in memory but could not be persisted.
    #[error("Failed to save cart: {0}")]
    Storage(#[from] StorageError),
}

/// One product and its requested quantity.
///
/// Serialized flat: the product fields sit next to `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Sum of `price x quantity` over a set of lines.
#[must_use]
pub fn subtotal_of(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

/// The active shopping cart.
pub struct Cart {
    lines: Vec<CartLine>,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart").field("lines", &self.lines).finish_non_exhaustive()
    }
}

impl Cart {
    /// Load the persisted cart. An absent or malformed slot starts empty;
    /// individual malformed lines are skipped.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let mut lines: Vec<CartLine> = load_json_records(store.as_ref(), Slot::Cart);
        // At most one line per product, never a zero quantity.
        let mut seen = Vec::with_capacity(lines.len());
        lines.retain(|line| {
            if line.quantity == 0 || seen.contains(&line.product.id) {
                return false;
            }
            seen.push(line.product.id);
            true
        });

        tracing::debug!(lines = lines.len(), "Cart loaded");
        Self { lines, store }
    }

    /// Add one unit of a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotFound` if the product is not in the catalog,
    /// or `CartError::Storage` if the cart could not be persisted.
    pub fn add(&mut self, catalog: &Catalog, product_id: ProductId) -> Result<&CartLine, CartError> {
        let product = catalog
            .get(product_id)
            .ok_or(CartError::NotFound(product_id))?;

        let index = if let Some(index) = self.position(product_id) {
            if let Some(line) = self.lines.get_mut(index) {
                line.quantity = line.quantity.saturating_add(1);
            }
            index
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            });
            self.lines.len() - 1
        };

        tracing::debug!(product_id = %product_id, "Added to cart");
        self.persist()?;

        self.lines
            .get(index)
            .ok_or(CartError::NotFound(product_id))
    }

    /// Remove a product's line. Returns the removed line, if there was one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart could not be persisted.
    pub fn remove(&mut self, product_id: ProductId) -> Result<Option<CartLine>, CartError> {
        let Some(index) = self.position(product_id) else {
            return Ok(None);
        };

        let removed = self.lines.remove(index);
        tracing::debug!(product_id = %product_id, "Removed from cart");
        self.persist()?;
        Ok(Some(removed))
    }

    /// Set the quantity of an existing line.
    ///
    /// Zero or a negative quantity removes the line. Products without a
    /// line are left alone.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if `quantity` exceeds `u32::MAX`,
    /// or `CartError::Storage` if the cart could not be persisted.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove(product_id)?;
            return Ok(());
        }

        let quantity =
            u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity(quantity.to_string()))?;

        let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) else {
            return Ok(());
        };
        line.quantity = quantity;

        tracing::debug!(product_id = %product_id, quantity, "Cart quantity set");
        self.persist()?;
        Ok(())
    }

    /// Set a quantity from raw user input.
    ///
    /// Input that is not a whole number is treated like zero and removes
    /// the line; otherwise behaves as [`Cart::set_quantity`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if the number is too large, or
    /// `CartError::Storage` if the cart could not be persisted.
    pub fn set_quantity_input(&mut self, product_id: ProductId, raw: &str) -> Result<(), CartError> {
        let quantity = match raw.trim().parse::<i64>() {
            Ok(quantity) => quantity,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                return Err(CartError::InvalidQuantity(raw.to_string()));
            }
            Err(_) => {
                tracing::debug!(product_id = %product_id, raw, "Non-numeric quantity, removing line");
                0
            }
        };
        self.set_quantity(product_id, quantity)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart could not be persisted.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.lines.clear();
        self.persist()?;
        Ok(())
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price x quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        subtotal_of(&self.lines)
    }

    /// Shipping charge: the flat surcharge, or zero for an empty cart.
    #[must_use]
    pub fn shipping(&self) -> Decimal {
        if self.is_empty() {
            Decimal::ZERO
        } else {
            SHIPPING_SURCHARGE
        }
    }

    /// Subtotal plus shipping.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal() + self.shipping()
    }

    /// Total number of units (for the cart badge), not the number of lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product.id == product_id)
    }

    fn persist(&self) -> Result<(), StorageError> {
        save_json(self.store.as_ref(), Slot::Cart, &self.lines)
    }
}
