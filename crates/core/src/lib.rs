//! TechNova Core - Shared domain types.
//!
//! This crate provides the types shared by the storefront library and the
//! command-line adapter:
//! - `storefront` - Catalog, cart, session and order models
//! - `cli` - Rendering adapter that raises intents into the models
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
