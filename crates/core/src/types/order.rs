//! Placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::OrderId;
use super::price::Price;
use super::product::CartLineItem;

/// A write-once record of a checkout.
///
/// `line_items` is a snapshot of the cart at checkout time. Whether `total`
/// includes shipping depends on the storefront configuration; by default it
/// equals `subtotal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "items")]
    pub line_items: Vec<CartLineItem>,
    pub subtotal: Price,
    pub total: Price,
}

impl Order {
    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.line_items
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }
}
