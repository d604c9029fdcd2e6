//! Luxury Jewelry Core - Shared domain types.
//!
//! This crate provides the types used across all storefront components:
//! - `storefront` - Cart, filter and order state backed by key-value storage
//! - `cli` - Command-line host that drives the storefront state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no clocks.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and quantities plus the
//!   product, line item, order and filter records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
