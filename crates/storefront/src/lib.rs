//! TechNova storefront library.
//!
//! Client-side storefront models: a catalog fetched from a remote JSON API,
//! a view model deriving the visible product list, a persistent cart, and a
//! single-user session with its order history. All durable state goes
//! through a [`storage::KeyValueStore`].
//!
//! The [`app::Storefront`] context ties the models together and is driven
//! by typed [`app::Intent`] values.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod session;
pub mod storage;
pub mod view;

pub use app::{CheckoutForm, Intent, Storefront};
pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
