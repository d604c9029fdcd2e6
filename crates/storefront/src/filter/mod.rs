//! Catalog filtering.
//!
//! [`matches`] and [`apply`] evaluate products against a [`FilterSpec`] and
//! never touch storage. [`FilterStore`] holds the filter the shopper last
//! applied and persists it across sessions.

mod engine;

use luxury_jewelry_core::{FilterSpec, Price, Product};
use tracing::{debug, instrument};

pub use engine::{FilterOutcome, apply, matches};

use crate::config::FilterConfig;
use crate::events::Observers;
use crate::storage::{KeyValueStore, StorageError, read_json_or_none, write_json};

/// Notification emitted after the saved filter changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    Applied(FilterSpec),
    Reset,
}

/// The active catalog filter and its persisted copy.
#[derive(Debug)]
pub struct FilterStore<S> {
    storage: S,
    key: String,
    default_max_price: Price,
    active: Option<FilterSpec>,
    observers: Observers<FilterEvent>,
}

impl<S: KeyValueStore> FilterStore<S> {
    /// Open the filter store, restoring the last saved spec if there is one.
    pub fn open(storage: S, config: &FilterConfig) -> Self {
        let mut store = Self {
            storage,
            key: config.storage_key.clone(),
            default_max_price: config.default_max_price,
            active: None,
            observers: Observers::new(),
        };
        store.active = store.load();
        debug!(restored = store.active.is_some(), "Filter store opened");
        store
    }

    /// Read the saved spec from storage.
    ///
    /// Returns `None` if nothing is saved or the saved value is corrupt.
    #[must_use]
    pub fn load(&self) -> Option<FilterSpec> {
        read_json_or_none(&self.storage, &self.key)
    }

    /// Persist `spec` and make it the active filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec cannot be written. The active filter is
    /// left unchanged in that case.
    #[instrument(skip(self, spec), fields(max_price = spec.max_price.minor()))]
    pub fn save(&mut self, spec: FilterSpec) -> Result<(), StorageError> {
        write_json(&self.storage, &self.key, &spec)?;
        debug!(
            materials = spec.materials.len(),
            categories = spec.categories.len(),
            require_stones = spec.require_stones,
            "Filter saved"
        );
        self.active = Some(spec.clone());
        self.observers.emit(&FilterEvent::Applied(spec));
        Ok(())
    }

    /// Forget the saved spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved spec cannot be removed.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.storage.remove(&self.key)?;
        self.active = None;
        debug!("Filter reset");
        self.observers.emit(&FilterEvent::Reset);
        Ok(())
    }

    /// The applied spec, or `None` after a reset or before anything was
    /// applied.
    #[must_use]
    pub const fn active(&self) -> Option<&FilterSpec> {
        self.active.as_ref()
    }

    /// The spec products are evaluated against: the applied one, or a spec
    /// that only enforces the default price ceiling.
    #[must_use]
    pub fn effective(&self) -> FilterSpec {
        self.active
            .clone()
            .unwrap_or_else(|| FilterSpec::with_max_price(self.default_max_price))
    }

    /// Whether `product` passes the effective filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match &self.active {
            Some(spec) => matches(product, spec),
            None => matches(product, &FilterSpec::with_max_price(self.default_max_price)),
        }
    }

    /// Filter `products` by the effective filter.
    pub fn apply<'a, I>(&self, products: I) -> FilterOutcome<'a>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        apply(products, &self.effective())
    }

    /// Register a callback invoked after every save or reset.
    pub fn subscribe(&mut self, callback: impl FnMut(&FilterEvent) + 'static) {
        self.observers.subscribe(callback);
    }
}
