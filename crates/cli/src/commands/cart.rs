//! Cart commands.

use technova_core::ProductId;
use technova_storefront::config::StorefrontConfig;
use technova_storefront::Intent;

use super::{CommandError, load_catalog, open};
use crate::render;

/// Print the cart.
pub fn show(config: &StorefrontConfig) {
    let app = open(config);
    render::emit(&render::cart_summary(app.cart()));
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the catalog could not be fetched, the product does
/// not exist, or the cart could not be saved.
pub async fn add(config: &StorefrontConfig, id: ProductId) -> Result<(), CommandError> {
    let mut app = open(config);
    load_catalog(&mut app, config).await?;

    app.dispatch(Intent::AddToCart(id))?;
    if let Some(line) = app.cart().line(id) {
        render::emit(&format!(
            "Added {} to cart (quantity {})",
            line.product.title, line.quantity
        ));
    }
    render::emit(&format!("Cart items: {}", app.cart().count()));
    Ok(())
}

/// Remove a product's line.
///
/// # Errors
///
/// Returns an error if the cart could not be saved.
pub fn remove(config: &StorefrontConfig, id: ProductId) -> Result<(), CommandError> {
    let mut app = open(config);
    app.dispatch(Intent::RemoveFromCart(id))?;
    render::emit(&render::cart_summary(app.cart()));
    Ok(())
}

/// Set a line's quantity from raw input; zero or below removes it.
///
/// # Errors
///
/// Returns an error if the quantity is not a number or the cart could not
/// be saved.
pub fn set(config: &StorefrontConfig, id: ProductId, quantity: String) -> Result<(), CommandError> {
    let mut app = open(config);
    app.dispatch(Intent::SetQuantity {
        product_id: id,
        raw: quantity,
    })?;
    render::emit(&render::cart_summary(app.cart()));
    Ok(())
}
