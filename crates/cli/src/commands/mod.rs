//! Command implementations.
//!
//! Each command opens the application context over the configured data
//! directory, raises intents, and renders the resulting state.

pub mod account;
pub mod cart;
pub mod catalog;

use std::sync::Arc;

use technova_core::{EmailError, ProductId};
use technova_storefront::catalog::{CatalogClient, CatalogStatus};
use technova_storefront::config::{ConfigError, StorefrontConfig};
use technova_storefront::storage::{FileStore, KeyValueStore};
use technova_storefront::{Storefront, StorefrontError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog fetch failed.
    #[error("{0}")]
    CatalogUnavailable(String),

    /// No product with this ID in the catalog.
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    /// The command needs an active session.
    #[error("Not logged in. Run `tn-cli login` or `tn-cli demo-login` first")]
    NotLoggedIn,

    /// Email argument is malformed.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A storefront intent failed.
    #[error("{}", .0.user_message())]
    Storefront(#[from] StorefrontError),
}

/// Open the application context over the configured data directory.
pub fn open(config: &StorefrontConfig) -> Storefront {
    tracing::debug!(data_dir = %config.data_dir.display(), "Opening storefront");
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.data_dir.clone()));
    Storefront::new(store, config)
}

/// Fetch the catalog into `app`.
///
/// # Errors
///
/// Returns `CommandError::CatalogUnavailable` if the fetch failed.
pub async fn load_catalog(app: &mut Storefront, config: &StorefrontConfig) -> Result<(), CommandError> {
    let client = CatalogClient::new(config.catalog_url.clone());
    match app.load_catalog(&client).await {
        CatalogStatus::Failed { message } => Err(CommandError::CatalogUnavailable(message.clone())),
        CatalogStatus::Loading | CatalogStatus::Ready { .. } => Ok(()),
    }
}
