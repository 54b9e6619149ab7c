//! Catalog browsing commands.

use technova_core::ProductId;
use technova_storefront::config::StorefrontConfig;
use technova_storefront::view::{CategoryFilter, PriceBand, SortKey, suggestions};
use technova_storefront::Intent;

use super::{CommandError, load_catalog, open};
use crate::render;

/// Filter arguments for the product list.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<CategoryFilter>,
    pub price: PriceBand,
    pub sort: SortKey,
}

/// List the products matching `query`.
///
/// # Errors
///
/// Returns an error if the catalog could not be fetched.
pub async fn products(config: &StorefrontConfig, query: ProductQuery) -> Result<(), CommandError> {
    let mut app = open(config);
    load_catalog(&mut app, config).await?;

    if let Some(text) = query.search {
        app.dispatch(Intent::SearchChanged(text))?;
    }
    if let Some(category) = query.category {
        app.dispatch(Intent::SelectCategory(category))?;
    }
    app.dispatch(Intent::SelectPriceBand(query.price))?;
    app.dispatch(Intent::SelectSort(query.sort))?;

    let visible = app.visible_products();
    render::emit(&render::product_list(
        app.catalog_status(),
        &visible,
        &app.filter().active_filters(),
    ));
    Ok(())
}

/// Show one product.
///
/// # Errors
///
/// Returns an error if the catalog could not be fetched or has no such product.
pub async fn product(config: &StorefrontConfig, id: ProductId) -> Result<(), CommandError> {
    let mut app = open(config);
    load_catalog(&mut app, config).await?;

    let product = app
        .catalog()
        .get(id)
        .ok_or(CommandError::ProductNotFound(id))?;
    render::emit(&render::product_detail(product));
    Ok(())
}

/// List categories in catalog order.
///
/// # Errors
///
/// Returns an error if the catalog could not be fetched.
pub async fn categories(config: &StorefrontConfig) -> Result<(), CommandError> {
    let mut app = open(config);
    load_catalog(&mut app, config).await?;

    for category in app.catalog().categories() {
        render::emit(category);
    }
    Ok(())
}

/// Print search suggestions for a partial query.
pub fn suggest(query: &str) {
    let matches = suggestions(query);
    if matches.is_empty() {
        tracing::debug!(query, "No suggestions");
    }
    for term in matches {
        render::emit(term);
    }
}
