//! Application context and intent dispatch.
//!
//! [`Storefront`] owns every piece of client state: the catalog, the active
//! filter, the cart and the session. The presentation layer never mutates
//! these directly; it raises an [`Intent`] and re-renders from the
//! accessors afterwards.

use std::sync::Arc;

use technova_core::ProductId;

use crate::cart::Cart;
use crate::catalog::{Catalog, CatalogClient, CatalogStatus, FETCH_FAILED_MESSAGE, Product};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::orders::Order;
use crate::session::{
    ProfileData, ProfileUpdate, Session, demo_profile, validate_password_change,
};
use crate::storage::KeyValueStore;
use crate::view::{CategoryFilter, FilterKind, FilterState, PriceBand, SortKey, derive_visible};

/// Shipping details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl CheckoutForm {
    /// Single-line shipping address, `"{address}, {city}, {state} {zip}"`.
    ///
    /// Returns `None` when every field is blank.
    #[must_use]
    pub fn shipping_address(&self) -> Option<String> {
        let fields = [&self.address, &self.city, &self.state, &self.zip];
        if fields.iter().all(|f| f.trim().is_empty()) {
            return None;
        }
        Some(format!(
            "{}, {}, {} {}",
            self.address.trim(),
            self.city.trim(),
            self.state.trim(),
            self.zip.trim()
        ))
    }
}

/// A user action raised by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SearchChanged(String),
    SelectCategory(CategoryFilter),
    SelectPriceBand(PriceBand),
    SelectSort(SortKey),
    ClearFilter(FilterKind),
    AddToCart(ProductId),
    RemoveFromCart(ProductId),
    /// Quantity as typed by the user.
    SetQuantity {
        product_id: ProductId,
        raw: String,
    },
    Login(ProfileData),
    DemoLogin,
    Logout,
    DeleteAccount,
    UpdateProfile(ProfileUpdate),
    ChangePassword {
        new: String,
        confirm: String,
    },
    Checkout(CheckoutForm),
}

/// The storefront application context.
#[derive(Debug)]
pub struct Storefront {
    catalog: Catalog,
    catalog_status: CatalogStatus,
    filter: FilterState,
    cart: Cart,
    session: Session,
}

impl Storefront {
    /// Restore the cart and session from `store`.
    ///
    /// The catalog starts empty in [`CatalogStatus::Loading`]; call
    /// [`Storefront::load_catalog`] to populate it.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, config: &StorefrontConfig) -> Self {
        let cart = Cart::load(Arc::clone(&store));
        let session = Session::load(store, config.logout_orders);

        Self {
            catalog: Catalog::default(),
            catalog_status: CatalogStatus::Loading,
            filter: FilterState::default(),
            cart,
            session,
        }
    }

    /// Fetch the catalog and record the outcome.
    ///
    /// A failed fetch leaves the previous products in place and moves to
    /// [`CatalogStatus::Failed`]. Nothing is retried.
    pub async fn load_catalog(&mut self, client: &CatalogClient) -> &CatalogStatus {
        self.catalog_status = CatalogStatus::Loading;

        match client.fetch().await {
            Ok(products) => {
                let count = products.len();
                self.catalog.replace(products);
                self.catalog_status = CatalogStatus::Ready { count };
                tracing::info!(count, "Catalog loaded");
            }
            Err(e) => {
                tracing::error!(error = %e, endpoint = %client.endpoint(), "Failed to load catalog");
                self.catalog_status = CatalogStatus::Failed {
                    message: FETCH_FAILED_MESSAGE.to_string(),
                };
            }
        }

        &self.catalog_status
    }

    /// Install a product list directly, bypassing the fetch.
    pub fn set_catalog(&mut self, products: Vec<Product>) {
        let count = products.len();
        self.catalog.replace(products);
        self.catalog_status = CatalogStatus::Ready { count };
    }

    /// Apply one user action.
    ///
    /// # Errors
    ///
    /// Returns the model error for the failed action. State changed before
    /// a storage failure is kept in memory.
    pub fn dispatch(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::SearchChanged(text) => self.filter.search_text = text,
            Intent::SelectCategory(category) => self.filter.category = category,
            Intent::SelectPriceBand(band) => self.filter.price_band = band,
            Intent::SelectSort(key) => self.filter.sort_key = key,
            Intent::ClearFilter(kind) => self.filter.clear(kind),
            Intent::AddToCart(product_id) => {
                self.cart.add(&self.catalog, product_id)?;
            }
            Intent::RemoveFromCart(product_id) => {
                self.cart.remove(product_id)?;
            }
            Intent::SetQuantity { product_id, raw } => {
                self.cart.set_quantity_input(product_id, &raw)?;
            }
            Intent::Login(data) => {
                self.session.login(data)?;
            }
            Intent::DemoLogin => {
                self.session.login(demo_profile())?;
            }
            Intent::Logout => self.session.logout()?,
            Intent::DeleteAccount => self.session.delete_account()?,
            Intent::UpdateProfile(update) => {
                self.session.update_profile(update)?;
            }
            Intent::ChangePassword { new, confirm } => {
                validate_password_change(&new, &confirm)?;
                tracing::info!("Password change accepted");
            }
            Intent::Checkout(form) => self.checkout(&form)?,
        }
        Ok(())
    }

    fn checkout(&mut self, form: &CheckoutForm) -> Result<()> {
        let address = form.shipping_address();
        let placed = self
            .session
            .place_order(self.cart.lines(), address.as_deref())?;
        if placed.is_none() {
            tracing::debug!(
                logged_in = self.session.is_logged_in(),
                cart_empty = self.cart.is_empty(),
                "Checkout placed no order"
            );
        }

        self.cart.clear()?;
        Ok(())
    }

    /// Products matching the current filter, in display order.
    #[must_use]
    pub fn visible_products(&self) -> Vec<Product> {
        derive_visible(self.catalog.products(), &self.filter)
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn catalog_status(&self) -> &CatalogStatus {
        &self.catalog_status
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Active user's orders, most recent first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        self.session.orders()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use technova_core::SHIPPING_SURCHARGE;

    use super::*;
    use crate::cart::CartError;
    use crate::catalog::tests::product;
    use crate::error::StorefrontError;
    use crate::session::PasswordError;
    use crate::storage::MemoryStore;

    fn storefront() -> Storefront {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut app = Storefront::new(store, &StorefrontConfig::defaults().unwrap());
        app.set_catalog(vec![
            product(1, "Laptop", "electronics", Decimal::new(99_999, 2), Decimal::new(45, 1)),
            product(2, "Ring", "jewelery", Decimal::new(1_999, 2), Decimal::new(38, 1)),
            product(3, "Shirt", "men's clothing", Decimal::new(2_250, 2), Decimal::new(41, 1)),
        ]);
        app
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_shipping_address_format() {
        let form = CheckoutForm {
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
        };
        assert_eq!(
            form.shipping_address().as_deref(),
            Some("1 Main St, Springfield, IL 62701")
        );
        assert_eq!(CheckoutForm::default().shipping_address(), None);
    }

    #[test]
    fn test_filter_intents_drive_visible_list() {
        let mut app = storefront();
        assert_eq!(ids(&app.visible_products()), vec![1, 2, 3]);

        app.dispatch(Intent::SelectSort(SortKey::PriceAsc)).unwrap();
        assert_eq!(ids(&app.visible_products()), vec![2, 3, 1]);

        app.dispatch(Intent::SelectPriceBand(PriceBand::Under25)).unwrap();
        assert_eq!(ids(&app.visible_products()), vec![2, 3]);

        app.dispatch(Intent::SearchChanged("ring".to_string())).unwrap();
        assert_eq!(ids(&app.visible_products()), vec![2]);

        app.dispatch(Intent::ClearFilter(FilterKind::Search)).unwrap();
        app.dispatch(Intent::ClearFilter(FilterKind::Price)).unwrap();
        assert_eq!(ids(&app.visible_products()), vec![2, 3, 1]);
    }

    #[test]
    fn test_add_unknown_product_fails() {
        let mut app = storefront();
        let err = app.dispatch(Intent::AddToCart(ProductId::new(42))).unwrap_err();
        assert!(matches!(err, StorefrontError::Cart(CartError::NotFound(_))));
        assert!(app.cart().is_empty());
    }

    #[test]
    fn test_set_quantity_from_raw_input() {
        let mut app = storefront();
        app.dispatch(Intent::AddToCart(ProductId::new(2))).unwrap();
        app.dispatch(Intent::SetQuantity {
            product_id: ProductId::new(2),
            raw: "3".to_string(),
        })
        .unwrap();
        assert_eq!(app.cart().count(), 3);

        app.dispatch(Intent::SetQuantity {
            product_id: ProductId::new(2),
            raw: "lots".to_string(),
        })
        .unwrap();
        assert!(app.cart().is_empty());
    }

    #[test]
    fn test_checkout_places_order_and_clears_cart() {
        let mut app = storefront();
        app.dispatch(Intent::DemoLogin).unwrap();
        app.dispatch(Intent::AddToCart(ProductId::new(2))).unwrap();
        app.dispatch(Intent::AddToCart(ProductId::new(2))).unwrap();
        app.dispatch(Intent::AddToCart(ProductId::new(3))).unwrap();
        let expected_total = app.cart().total();

        app.dispatch(Intent::Checkout(CheckoutForm {
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
        }))
        .unwrap();

        assert!(app.cart().is_empty());
        assert_eq!(app.orders().len(), 1);
        let order = app.orders().first().unwrap();
        assert_eq!(order.total, expected_total);
        assert_eq!(order.total, Decimal::new(1_999 * 2 + 2_250, 2) + SHIPPING_SURCHARGE);
        assert_eq!(order.shipping_address, "1 Main St, Springfield, IL 62701");
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_checkout_logged_out_still_clears_cart() {
        let mut app = storefront();
        app.dispatch(Intent::AddToCart(ProductId::new(1))).unwrap();

        app.dispatch(Intent::Checkout(CheckoutForm::default())).unwrap();

        assert!(app.cart().is_empty());
        assert!(app.orders().is_empty());
    }

    #[test]
    fn test_checkout_blank_form_uses_profile_address() {
        let mut app = storefront();
        app.dispatch(Intent::DemoLogin).unwrap();
        app.dispatch(Intent::AddToCart(ProductId::new(3))).unwrap();

        app.dispatch(Intent::Checkout(CheckoutForm::default())).unwrap();

        let order = app.orders().first().unwrap();
        assert_eq!(order.shipping_address, "123 Tech Street, Digital City, DC 12345");
    }

    #[test]
    fn test_change_password_validation() {
        let mut app = storefront();
        let err = app
            .dispatch(Intent::ChangePassword {
                new: "longenough".to_string(),
                confirm: "different".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, StorefrontError::Password(PasswordError::Mismatch)));

        app.dispatch(Intent::ChangePassword {
            new: "longenough".to_string(),
            confirm: "longenough".to_string(),
        })
        .unwrap();
    }

    #[test]
    fn test_logout_hides_orders() {
        let mut app = storefront();
        app.dispatch(Intent::DemoLogin).unwrap();
        app.dispatch(Intent::AddToCart(ProductId::new(1))).unwrap();
        app.dispatch(Intent::Checkout(CheckoutForm::default())).unwrap();
        assert_eq!(app.orders().len(), 1);

        app.dispatch(Intent::Logout).unwrap();
        assert!(!app.session().is_logged_in());
        assert!(app.orders().is_empty());
    }
}
