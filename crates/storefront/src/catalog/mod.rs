//! Product catalog store and remote catalog client.
//!
//! # Architecture
//!
//! - The catalog is fetched once from a JSON API and held read-only
//! - No local edits; products are only replaced wholesale by a new fetch
//! - Field names match the remote API so responses deserialize directly
//!
//! # Example
//!
//! ```rust,ignore
//! use technova_storefront::catalog::{Catalog, CatalogClient};
//!
//! let client = CatalogClient::new(config.catalog_url.clone());
//! let catalog = Catalog::new(client.fetch().await?);
//! let categories = catalog.categories();
//! ```

mod client;

pub use client::{CatalogClient, FetchError};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use technova_core::ProductId;

/// Message shown in place of the product grid when the fetch fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load products. Please try again later.";

/// Aggregate customer rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score from 0 to 5.
    pub rate: Decimal,
    /// Number of ratings.
    pub count: u32,
}

impl Rating {
    /// Render the rating as five stars, rounding the score to a whole star.
    #[must_use]
    pub fn stars(&self) -> String {
        let filled = self
            .rate
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .clamp(Decimal::ZERO, Decimal::from(5))
            .mantissa();
        (0..5)
            .map(|i| if i < filled { '\u{2605}' } else { '\u{2606}' })
            .collect()
    }
}

/// A purchasable product, exactly as served by the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub category: String,
    /// Image URL.
    pub image: String,
    pub rating: Rating,
}

/// Loading state of the catalog, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Ready {
        count: usize,
    },
    Failed {
        message: String,
    },
}

/// The full product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    /// Replace the whole product list.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
    }
}
