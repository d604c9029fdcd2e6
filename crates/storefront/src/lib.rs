//! Luxury Jewelry storefront library.
//!
//! This crate holds the storefront's client-side state: the cart, the catalog
//! filter, the order log and the timers behind transient UI effects. Rendering
//! is left to the host, which drives a [`state::Storefront`] and renders the
//! view models it hands back.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod extractor;
pub mod filter;
pub mod state;
pub mod storage;
pub mod timers;
pub mod views;
