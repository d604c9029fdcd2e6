//! Core types for the jewelry storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod filter;
pub mod id;
pub mod material;
pub mod order;
pub mod price;
pub mod product;
pub mod quantity;

pub use filter::{DEFAULT_MAX_PRICE, FilterSpec};
pub use id::{OrderId, ProductId};
pub use material::Material;
pub use order::Order;
pub use price::Price;
pub use product::{CartLineItem, Product};
pub use quantity::{Quantity, QuantityError};
