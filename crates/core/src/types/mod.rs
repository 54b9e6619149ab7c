//! Core types for the TechNova storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{SHIPPING_SURCHARGE, format_money};
pub use status::OrderStatus;
