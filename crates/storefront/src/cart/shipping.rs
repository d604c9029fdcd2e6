//! Delivery pricing.

use luxury_jewelry_core::Price;

/// Flat-fee delivery that becomes free from a subtotal threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Subtotal from which delivery is free
    pub free_threshold: Price,
    /// Fee charged below the threshold
    pub flat_fee: Price,
}

impl ShippingPolicy {
    pub const DEFAULT_FREE_THRESHOLD: Price = Price::new(15_000);
    pub const DEFAULT_FLAT_FEE: Price = Price::new(300);

    /// Delivery cost for a cart with the given subtotal.
    ///
    /// An empty cart (zero subtotal) ships for free.
    #[must_use]
    pub fn compute(&self, subtotal: Price) -> Price {
        if subtotal.is_zero() || subtotal >= self.free_threshold {
            Price::ZERO
        } else {
            self.flat_fee
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: Self::DEFAULT_FREE_THRESHOLD,
            flat_fee: Self::DEFAULT_FLAT_FEE,
        }
    }
}
