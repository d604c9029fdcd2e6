//! Catalog filter criteria.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::material::Material;
use super::price::Price;

/// Price ceiling used when no filter has been applied (the slider maximum).
pub const DEFAULT_MAX_PRICE: Price = Price::new(100_000);

/// Constraints a product must satisfy to be shown in the catalog.
///
/// Each constraint group is satisfied by any of its values; all groups must be
/// satisfied. Empty `materials` or `categories` place no constraint.
///
/// Older sessions stored the stones flag as `stones`; it is still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default = "default_max_price")]
    pub max_price: Price,
    #[serde(default)]
    pub materials: BTreeSet<Material>,
    #[serde(default, alias = "stones")]
    pub require_stones: bool,
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

const fn default_max_price() -> Price {
    DEFAULT_MAX_PRICE
}

impl FilterSpec {
    /// A spec that constrains nothing but the price ceiling.
    #[must_use]
    pub const fn with_max_price(max_price: Price) -> Self {
        Self {
            max_price,
            materials: BTreeSet::new(),
            require_stones: false,
            categories: BTreeSet::new(),
        }
    }

    /// Whether only the price ceiling constrains this spec.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.materials.is_empty() && !self.require_stones && self.categories.is_empty()
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::with_max_price(DEFAULT_MAX_PRICE)
    }
}
