//! Application state shared by every page.
//!
//! [`Storefront`] is constructed once per session and owns the cart, the
//! filter store, the catalog and the UI timers. The host tells it which
//! [`Page`] is being shown and forwards user actions; it reads back display
//! data, queued toasts and due UI effects.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use luxury_jewelry_core::{CartLineItem, FilterSpec, Order, Product, ProductId, Quantity};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::cart::CartStore;
use crate::clock::Clock;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::extractor::{CatalogEntry, ProductExtractor};
use crate::filter::{FilterOutcome, FilterStore};
use crate::storage::KeyValueStore;
use crate::timers::{Scheduler, TimerKey};
use crate::views::{
    CartBadge, CartView, CatalogStatusView, cart_toast, checkout_error_toast, filter_toast,
};

/// The page the host is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Catalog,
    Cart,
    Other,
}

/// A delayed UI effect the host should carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Restore an add-to-cart button's normal label.
    RevertButton { element_id: String },
    /// Hide a toast.
    DismissToast { toast_id: String },
}

/// A toast waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: String,
    pub message: String,
}

/// What a freshly loaded page should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "lowercase")]
pub enum PageView {
    Catalog {
        badge: CartBadge,
        status: CatalogStatusView,
    },
    Cart {
        badge: CartBadge,
        cart: CartView,
    },
    Other {
        badge: CartBadge,
    },
}

type Pending = Rc<RefCell<Vec<String>>>;

/// Session state for the storefront.
pub struct Storefront<S> {
    config: StorefrontConfig,
    clock: Rc<dyn Clock>,
    cart: CartStore<Rc<S>>,
    filters: FilterStore<Rc<S>>,
    extractor: ProductExtractor,
    catalog: Vec<Product>,
    timers: Scheduler<UiEffect>,
    /// Toast texts raised by store observers, not yet given ids
    raised: Pending,
    notices: VecDeque<Notice>,
    next_toast: u64,
}

impl<S: KeyValueStore + 'static> Storefront<S> {
    /// Open the storefront over `storage`, restoring the cart and the saved
    /// filter.
    pub fn new(config: StorefrontConfig, storage: Rc<S>, clock: Rc<dyn Clock>) -> Self {
        let raised: Pending = Rc::new(RefCell::new(Vec::new()));

        let mut cart = CartStore::open(Rc::clone(&storage), &config.cart, Rc::clone(&clock));
        let sink = Rc::clone(&raised);
        cart.subscribe(move |event| {
            if let Some(message) = cart_toast(event) {
                sink.borrow_mut().push(message);
            }
        });

        let mut filters = FilterStore::open(storage, &config.filters);
        let sink = Rc::clone(&raised);
        filters.subscribe(move |event| sink.borrow_mut().push(filter_toast(event)));

        Self {
            extractor: ProductExtractor::new(Rc::clone(&clock)),
            config,
            clock,
            cart,
            filters,
            catalog: Vec::new(),
            timers: Scheduler::new(),
            raised,
            notices: VecDeque::new(),
            next_toast: 0,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<Rc<S>> {
        &self.cart
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterStore<Rc<S>> {
        &self.filters
    }

    /// Read the rendered catalog, replacing any previously loaded one.
    ///
    /// Entries that cannot be read are skipped. Returns the number of
    /// products loaded.
    pub fn load_catalog(&mut self, entries: &mut [CatalogEntry]) -> usize {
        self.catalog = self.extractor.extract_all(entries);
        debug!(products = self.catalog.len(), entries = entries.len(), "Catalog loaded");
        self.catalog.len()
    }

    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.catalog.iter().find(|product| &product.id == id)
    }

    /// Catalog products passing the active filter.
    #[must_use]
    pub fn visible_products(&self) -> FilterOutcome<'_> {
        self.filters.apply(&self.catalog)
    }

    /// Display data for `page`.
    #[instrument(skip(self))]
    pub fn on_page_load(&self, page: Page) -> PageView {
        let badge = self.badge();
        match page {
            Page::Catalog => PageView::Catalog {
                badge,
                status: CatalogStatusView::from(&self.visible_products()),
            },
            Page::Cart => PageView::Cart {
                badge,
                cart: self.cart_view(),
            },
            Page::Other => PageView::Other { badge },
        }
    }

    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::from(&self.cart)
    }

    #[must_use]
    pub fn badge(&self) -> CartBadge {
        CartBadge::from(&self.cart)
    }

    /// Add one unit of the product shown by `entry`.
    ///
    /// When the click came from a button, `button_id` names it; the button's
    /// revert is scheduled, replacing any revert already pending for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be read or the cart cannot be
    /// written.
    pub fn add_to_cart(
        &mut self,
        entry: &mut CatalogEntry,
        button_id: Option<&str>,
    ) -> Result<CartLineItem> {
        let product = self.extractor.extract(entry)?;
        let line = self.cart.add_one(&product);
        self.flush_toasts();
        let line = line?;

        if let Some(element_id) = button_id {
            self.timers.schedule_in(
                TimerKey::ButtonRevert(element_id.to_string()),
                self.clock.now(),
                self.config.ui.button_revert_delay,
                UiEffect::RevertButton {
                    element_id: element_id.to_string(),
                },
            );
        }
        Ok(line)
    }

    /// Add `quantity` units of the catalog product `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the product is not in the loaded
    /// catalog, or an error if the cart cannot be written.
    pub fn add_product(&mut self, id: &ProductId, quantity: Quantity) -> Result<CartLineItem> {
        let product = self
            .product(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        let line = self.cart.add_item(&product, quantity);
        self.flush_toasts();
        Ok(line?)
    }

    /// Set the quantity of a cart line; below one removes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<Option<CartLineItem>> {
        let line = self.cart.set_quantity(id, quantity);
        self.flush_toasts();
        Ok(line?)
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    pub fn remove_item(&mut self, id: &ProductId) -> Result<Option<CartLineItem>> {
        let removed = self.cart.remove_item(id);
        self.flush_toasts();
        Ok(removed?)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    pub fn clear_cart(&mut self) -> Result<bool> {
        let cleared = self.cart.clear();
        self.flush_toasts();
        Ok(cleared?)
    }

    /// Check out the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty (a toast says so) or the order
    /// cannot be recorded.
    pub fn checkout(&mut self) -> Result<Order> {
        match self.cart.checkout() {
            Ok(order) => {
                self.flush_toasts();
                Ok(order)
            }
            Err(e) => {
                if let Some(message) = checkout_error_toast(&e) {
                    self.raised.borrow_mut().push(message);
                }
                self.flush_toasts();
                Err(e.into())
            }
        }
    }

    /// Save `spec` as the active filter and report what the catalog shows.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter cannot be written.
    pub fn apply_filters(&mut self, spec: FilterSpec) -> Result<CatalogStatusView> {
        let saved = self.filters.save(spec);
        self.flush_toasts();
        saved?;
        Ok(CatalogStatusView::from(&self.visible_products()))
    }

    /// Forget the saved filter and report what the catalog shows.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved filter cannot be removed.
    pub fn reset_filters(&mut self) -> Result<CatalogStatusView> {
        let reset = self.filters.reset();
        self.flush_toasts();
        reset?;
        Ok(CatalogStatusView::from(&self.visible_products()))
    }

    /// Take the toasts raised since the last call, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Take the UI effects that are due now.
    pub fn due_effects(&mut self) -> Vec<UiEffect> {
        self.timers
            .take_due(self.clock.now())
            .into_iter()
            .map(|(_, effect)| effect)
            .collect()
    }

    /// Number of UI effects still waiting for their deadline.
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.timers.len()
    }

    /// Give raised toast texts ids and schedule their dismissal.
    fn flush_toasts(&mut self) {
        let raised: Vec<String> = self.raised.borrow_mut().drain(..).collect();
        let now = self.clock.now();
        for message in raised {
            self.next_toast += 1;
            let id = format!("toast-{}", self.next_toast);
            self.timers.schedule_in(
                TimerKey::Toast(id.clone()),
                now,
                self.config.ui.toast_dismiss_delay,
                UiEffect::DismissToast {
                    toast_id: id.clone(),
                },
            );
            self.notices.push_back(Notice { id, message });
        }
    }
}

impl<S> std::fmt::Debug for Storefront<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("config", &self.config)
            .field("cart", &self.cart)
            .field("catalog", &self.catalog.len())
            .field("timers", &self.timers.len())
            .field("notices", &self.notices)
            .finish_non_exhaustive()
    }
}
