//! Unified error handling.
//!
//! Provides a unified `StorefrontError` aggregating the per-model errors.
//! Intent dispatch returns `Result<T, StorefrontError>`; none of these
//! errors is fatal, the presentation layer shows them and carries on.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::FetchError;
use crate::config::ConfigError;
use crate::session::{PasswordError, SessionError};
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Catalog could not be fetched.
    #[error("Catalog error: {0}")]
    Fetch(#[from] FetchError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Session operation failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Password change form was rejected.
    #[error("{0}")]
    Password(#[from] PasswordError),

    /// Slot read or write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl StorefrontError {
    /// Message suitable for showing to the shopper.
    ///
    /// Storage and transport details are kept out of user-facing text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Fetch(_) => crate::catalog::FETCH_FAILED_MESSAGE.to_string(),
            Self::Cart(CartError::NotFound(id)) => format!("Product {id} is not available"),
            Self::Cart(CartError::InvalidQuantity(raw)) => {
                format!("\"{raw}\" is not a valid quantity")
            }
            Self::Session(SessionError::InvalidEmail(e)) => format!("Please enter a valid email: {e}"),
            Self::Password(e) => e.to_string(),
            Self::Config(e) => e.to_string(),
            Self::Cart(CartError::Storage(_))
            | Self::Session(SessionError::Storage(_))
            | Self::Storage(_) => "Your changes could not be saved on this device".to_string(),
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use technova_core::ProductId;

    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorefrontError::from(CartError::NotFound(ProductId::new(3)));
        assert_eq!(err.to_string(), "Cart error: Product 3 not found");

        let err = StorefrontError::from(FetchError::Status { status: 500 });
        assert_eq!(err.to_string(), "Catalog error: Catalog request returned HTTP 500");
    }

    #[test]
    fn test_user_messages_hide_internals() {
        let err = StorefrontError::from(FetchError::Status { status: 502 });
        assert_eq!(
            err.user_message(),
            "Failed to load products. Please try again later."
        );

        let err = StorefrontError::from(StorageError::Poisoned);
        assert!(!err.user_message().contains("lock"));

        let err = StorefrontError::from(CartError::InvalidQuantity("abc".to_string()));
        assert_eq!(err.user_message(), "\"abc\" is not a valid quantity");
    }
}
