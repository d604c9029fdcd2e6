//! Shopping cart state.
//!
//! The cart is an ordered list of line items, at most one per product id,
//! each holding at least one unit. It is restored from storage when opened and
//! written back in full after every mutation, before the mutating call
//! returns. Observers are notified once the write has succeeded.
//!
//! Checkout snapshots the cart into an [`Order`], appends it to the
//! [`OrderLog`] and empties the cart.

mod orders;
mod restore;
mod shipping;

use std::fmt;
use std::rc::Rc;

use luxury_jewelry_core::{CartLineItem, Order, OrderId, Price, Product, ProductId, Quantity};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

pub use orders::OrderLog;
pub use shipping::ShippingPolicy;

use crate::clock::Clock;
use crate::config::CartConfig;
use crate::events::Observers;
use crate::storage::{KeyValueStore, StorageError, write_json};
use restore::{Restored, migrate_legacy, restore_cart};

/// Errors raised by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Checkout was requested with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The cart or order log could not be written.
    #[error("cart storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Notification emitted after a cart mutation has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A product was added or its quantity incremented.
    ItemAdded {
        /// The line after the change.
        item: CartLineItem,
        /// Units added by this call.
        added: Quantity,
    },
    /// A line's quantity was set to a new value.
    QuantityChanged { item: CartLineItem },
    /// A removal was requested. `removed` is `None` if the id was not in the
    /// cart.
    ItemRemoved {
        id: ProductId,
        removed: Option<CartLineItem>,
    },
    /// All lines were removed.
    Cleared,
    /// The cart was checked out and emptied.
    CheckedOut { order: Order },
}

/// The shopping cart.
pub struct CartStore<S> {
    storage: S,
    key: String,
    orders: OrderLog<S>,
    shipping: ShippingPolicy,
    order_total_includes_shipping: bool,
    clock: Rc<dyn Clock>,
    lines: Vec<CartLineItem>,
    observers: Observers<CartEvent>,
}

impl<S: KeyValueStore + Clone> CartStore<S> {
    /// Open the cart stored in `storage`.
    ///
    /// Missing or corrupt state opens as an empty cart. A legacy name-keyed
    /// cart, if present, is folded in and its key removed. Repairs made while
    /// restoring are written back immediately; a failure to do so is logged
    /// and the in-memory cart is still returned.
    pub fn open(storage: S, config: &CartConfig, clock: Rc<dyn Clock>) -> Self {
        let Restored { mut lines, repaired } = restore_cart(&storage, &config.storage_key);
        let migrated = migrate_legacy(&storage, &config.legacy_key, &mut lines);

        let store = Self {
            orders: OrderLog::new(storage.clone(), config.orders_key.clone()),
            storage,
            key: config.storage_key.clone(),
            shipping: config.shipping,
            order_total_includes_shipping: config.order_total_includes_shipping,
            clock,
            lines,
            observers: Observers::new(),
        };

        if repaired > 0 || migrated.is_some() {
            match store.persist() {
                Ok(()) => {
                    if let Some(count) = migrated {
                        info!(migrated = count, "Migrated legacy cart");
                        if let Err(e) = store.storage.remove(&config.legacy_key) {
                            warn!(error = %e, "Failed to remove legacy cart");
                        }
                    }
                    if repaired > 0 {
                        info!(repaired, "Repaired restored cart");
                    }
                }
                Err(e) => warn!(error = %e, "Failed to write back restored cart"),
            }
        }

        debug!(
            lines = store.lines.len(),
            items = store.total_item_count(),
            "Cart opened"
        );
        store
    }
}

impl<S: KeyValueStore> CartStore<S> {
    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| &line.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// The order log checkouts are appended to.
    #[must_use]
    pub const fn orders(&self) -> &OrderLog<S> {
        &self.orders
    }

    /// The delivery pricing in effect.
    #[must_use]
    pub const fn shipping_policy(&self) -> ShippingPolicy {
        self.shipping
    }

    /// Register a callback invoked after every persisted mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&CartEvent) + 'static) {
        self.observers.subscribe(callback);
    }

    /// Add `quantity` units of `product`.
    ///
    /// Increments the existing line for the product or appends a new one.
    /// Returns the resulting line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written. The in-memory cart
    /// keeps the change and the next successful write persists it.
    #[instrument(skip(self, product), fields(id = %product.id, quantity = quantity.get()))]
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: Quantity,
    ) -> Result<CartLineItem, StorageError> {
        let item = if let Some(line) = self.lines.iter_mut().find(|line| line.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            line.clone()
        } else {
            let line = CartLineItem::from_product(product, quantity);
            self.lines.push(line.clone());
            line
        };

        self.persist()?;
        debug!(total = item.quantity.get(), "Added to cart");
        self.observers.emit(&CartEvent::ItemAdded {
            item: item.clone(),
            added: quantity,
        });
        Ok(item)
    }

    /// Add a single unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    pub fn add_one(&mut self, product: &Product) -> Result<CartLineItem, StorageError> {
        self.add_item(product, Quantity::ONE)
    }

    /// Set the quantity of the line for `id` to exactly `quantity`.
    ///
    /// A quantity below one removes the line, exactly like
    /// [`remove_item`](Self::remove_item). Setting the quantity of a product
    /// that is not in the cart does nothing and writes nothing. Returns the
    /// updated line, or `None` if the line was removed or absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    #[instrument(skip(self), fields(id = %id))]
    pub fn set_quantity(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<Option<CartLineItem>, StorageError> {
        let quantity = match Quantity::try_from(quantity) {
            Ok(quantity) => quantity,
            Err(_) if quantity < 1 => {
                self.remove_item(id)?;
                return Ok(None);
            }
            // Larger than any line can hold
            Err(_) => Quantity::new(u32::MAX).unwrap_or(Quantity::ONE),
        };

        let Some(line) = self.lines.iter_mut().find(|line| &line.id == id) else {
            debug!("Quantity change for product not in cart ignored");
            return Ok(None);
        };
        line.quantity = quantity;
        let item = line.clone();

        self.persist()?;
        self.observers
            .emit(&CartEvent::QuantityChanged { item: item.clone() });
        Ok(Some(item))
    }

    /// Remove the line for `id`.
    ///
    /// Removing an id that is not in the cart is not an error; the cart is
    /// written either way. Returns the removed line, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    #[instrument(skip(self), fields(id = %id))]
    pub fn remove_item(&mut self, id: &ProductId) -> Result<Option<CartLineItem>, StorageError> {
        let removed = self
            .lines
            .iter()
            .position(|line| &line.id == id)
            .map(|index| self.lines.remove(index));

        self.persist()?;
        debug!(removed = removed.is_some(), "Removed from cart");
        self.observers.emit(&CartEvent::ItemRemoved {
            id: id.clone(),
            removed: removed.clone(),
        });
        Ok(removed)
    }

    /// Remove every line.
    ///
    /// Clearing an empty cart writes nothing and notifies nobody. Returns
    /// whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<bool, StorageError> {
        if self.lines.is_empty() {
            return Ok(false);
        }
        self.lines.clear();
        self.persist()?;
        debug!("Cart cleared");
        self.observers.emit(&CartEvent::Cleared);
        Ok(true)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Sum of unit price times quantity across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }

    /// Delivery cost for `subtotal` under the configured policy.
    #[must_use]
    pub fn compute_shipping(&self, subtotal: Price) -> Price {
        self.shipping.compute(subtotal)
    }

    /// Subtotal plus delivery, as shown in the cart summary.
    #[must_use]
    pub fn total_with_shipping(&self) -> Price {
        let subtotal = self.subtotal();
        subtotal + self.compute_shipping(subtotal)
    }

    /// Place an order for the current cart contents.
    ///
    /// The order's total equals its subtotal unless the storefront is
    /// configured to record shipping in order totals. On success the order is
    /// in the log and the cart is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] if there is nothing to order (the log
    /// is left untouched), or a storage error if the log or the emptied cart
    /// cannot be written. On a storage error no order is recorded and the
    /// cart keeps its lines.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<Order, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let now = self.clock.now();
        let subtotal = self.subtotal();
        let total = if self.order_total_includes_shipping {
            subtotal + self.compute_shipping(subtotal)
        } else {
            subtotal
        };

        let order = Order {
            id: OrderId::from_timestamp(now.timestamp_millis(), self.orders.latest_id()),
            created_at: now,
            line_items: self.lines.clone(),
            subtotal,
            total,
        };
        // Cart is emptied in storage first; either failure puts the lines back
        let lines = std::mem::take(&mut self.lines);
        if let Err(e) = self.persist() {
            self.lines = lines;
            return Err(e.into());
        }
        if let Err(e) = self.orders.append(&order) {
            self.lines = lines;
            if let Err(restore) = self.persist() {
                warn!(error = %restore, "Failed to restore cart after order write failed");
            }
            return Err(e.into());
        }

        info!(order_id = %order.id, items = order.item_count(), "Checked out");
        self.observers.emit(&CartEvent::CheckedOut {
            order: order.clone(),
        });
        Ok(order)
    }

    /// Write the whole cart to storage.
    fn persist(&self) -> Result<(), StorageError> {
        write_json(&self.storage, &self.key, &self.lines)
    }
}

impl<S> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("lines", &self.lines)
            .field("shipping", &self.shipping)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
