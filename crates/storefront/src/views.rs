//! Display data for the presentation layer.
//!
//! Everything here is derived from store state and formatted for display;
//! nothing holds a reference back into the stores.

use luxury_jewelry_core::{CartLineItem, Order, Price};
use serde::Serialize;

use crate::cart::{CartError, CartEvent, CartStore};
use crate::filter::{FilterEvent, FilterOutcome};
use crate::storage::KeyValueStore;

/// Label an add-to-cart button shows until its revert timer fires.
pub const ADDED_BUTTON_LABEL: &str = "✓ Добавлено";

const FREE_DELIVERY: &str = "Бесплатно";
const CHECKOUT_LABEL: &str = "Оформить заказ";
const CHECKOUT_DISABLED_LABEL: &str = "Добавьте товары в корзину";

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    /// e.g. "Золото 585", empty when the material is unknown
    pub material: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            image: line.image_ref.clone(),
            material: line.material.label().to_string(),
            quantity: line.quantity.get(),
            price: line.unit_price.to_string(),
            line_price: line.line_total().to_string(),
        }
    }
}

/// Order summary display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub subtotal: String,
    pub delivery: String,
    pub total: String,
    pub checkout_enabled: bool,
    pub checkout_label: &'static str,
}

impl SummaryView {
    /// Summary for a cart with the given subtotal and delivery cost.
    #[must_use]
    pub fn new(subtotal: Price, delivery: Price) -> Self {
        let checkout_enabled = !subtotal.is_zero();
        Self {
            subtotal: subtotal.to_string(),
            delivery: if delivery.is_zero() {
                FREE_DELIVERY.to_string()
            } else {
                delivery.to_string()
            },
            total: (subtotal + delivery).to_string(),
            checkout_enabled,
            checkout_label: if checkout_enabled {
                CHECKOUT_LABEL
            } else {
                CHECKOUT_DISABLED_LABEL
            },
        }
    }
}

/// Cart page display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub summary: SummaryView,
    pub item_count: u64,
}

impl CartView {
    /// Whether the empty-cart message replaces the item list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: KeyValueStore> From<&CartStore<S>> for CartView {
    fn from(cart: &CartStore<S>) -> Self {
        let subtotal = cart.subtotal();
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            summary: SummaryView::new(subtotal, cart.compute_shipping(subtotal)),
            item_count: cart.total_item_count(),
        }
    }
}

/// The cart counter in the site header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartBadge {
    pub count: u64,
    /// Hidden while the cart is empty
    pub visible: bool,
}

impl<S: KeyValueStore> From<&CartStore<S>> for CartBadge {
    fn from(cart: &CartStore<S>) -> Self {
        let count = cart.total_item_count();
        Self {
            count,
            visible: count > 0,
        }
    }
}

/// Confirmation shown after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmationView {
    /// e.g. "#1772971200000"
    pub number: String,
    pub total: String,
    pub item_count: u64,
}

impl From<&Order> for OrderConfirmationView {
    fn from(order: &Order) -> Self {
        Self {
            number: format!("#{}", order.id),
            total: order.total.to_string(),
            item_count: order.item_count(),
        }
    }
}

/// Catalog status line shown under the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStatusView {
    pub shown: usize,
    pub total: usize,
    /// Set when nothing matched.
    pub empty_message: Option<EmptyCatalogMessage>,
}

/// The "nothing found" message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyCatalogMessage {
    pub title: &'static str,
    pub hint: &'static str,
}

impl From<&FilterOutcome<'_>> for CatalogStatusView {
    fn from(outcome: &FilterOutcome<'_>) -> Self {
        Self {
            shown: outcome.matched_count(),
            total: outcome.total(),
            empty_message: outcome.is_empty().then_some(EmptyCatalogMessage {
                title: "Товары не найдены",
                hint: "Попробуйте изменить параметры фильтрации или сбросить фильтры",
            }),
        }
    }
}

/// Toast text for a cart change, if it warrants one.
#[must_use]
pub fn cart_toast(event: &CartEvent) -> Option<String> {
    match event {
        CartEvent::ItemAdded { item, .. } => Some(format!("\"{}\" добавлен в корзину!", item.name)),
        CartEvent::ItemRemoved {
            removed: Some(_), ..
        } => Some("Товар удален из корзины".to_string()),
        CartEvent::Cleared => Some("Корзина очищена".to_string()),
        CartEvent::QuantityChanged { .. }
        | CartEvent::ItemRemoved { removed: None, .. }
        | CartEvent::CheckedOut { .. } => None,
    }
}

/// Toast text for a filter change.
#[must_use]
pub fn filter_toast(event: &FilterEvent) -> String {
    match event {
        FilterEvent::Applied(_) => "Фильтры применены".to_string(),
        FilterEvent::Reset => "Фильтры сброшены".to_string(),
    }
}

/// Toast text for a failed checkout, if the shopper should see one.
#[must_use]
pub fn checkout_error_toast(error: &CartError) -> Option<String> {
    match error {
        CartError::EmptyCart => Some("Корзина пуста".to_string()),
        CartError::Storage(_) => None,
    }
}
