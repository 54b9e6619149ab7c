//! View model: derives the visible product list from the catalog and filter.
//!
//! [`derive_visible`] is a pure function of its inputs. The filter is
//! applied first, then a stable sort, so products that tie under the active
//! sort key always keep their catalog order.

mod filter;
mod suggestions;

pub use filter::{ActiveFilter, CategoryFilter, FilterKind, FilterState, PriceBand, SortKey};
pub use suggestions::{MAX_SUGGESTIONS, suggestions};

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::catalog::Product;

/// Compute the products to show for a filter state.
///
/// A product is kept when its category, price band and search text all
/// match. An empty result is a normal outcome, not an error.
#[must_use]
pub fn derive_visible(catalog: &[Product], filter: &FilterState) -> Vec<Product> {
    let needle = filter.search_needle();

    let mut visible: Vec<Product> = catalog
        .iter()
        .filter(|p| filter.category.matches(&p.category))
        .filter(|p| filter.price_band.contains(p.price))
        .filter(|p| matches_search(p, &needle))
        .cloned()
        .collect();

    sort_products(&mut visible, filter.sort_key);

    tracing::debug!(
        total = catalog.len(),
        visible = visible.len(),
        sort = %filter.sort_key,
        "Derived visible products"
    );
    visible
}

fn matches_search(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.title.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
}

/// Stable in-place sort by the given key.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::Default => {}
        SortKey::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::NameAsc => products.sort_by(|a, b| collate(&a.title, &b.title)),
        SortKey::NameDesc => products.sort_by(|a, b| collate(&b.title, &a.title)),
        SortKey::RatingDesc => products.sort_by(|a, b| b.rating.rate.cmp(&a.rating.rate)),
    }
}

/// Title collation.
///
/// Primary strength ignores case and accents, so "Écran" files under `e`.
/// Accents then case break ties, and raw text decides anything left.
fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| folded_case(a).cmp(&folded_case(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn folded_case(s: &str) -> String {
    s.nfd().collect::<String>().to_lowercase()
}
