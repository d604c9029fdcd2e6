//! Integration tests for the luxury jewelry storefront state.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p luxury-jewelry-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopping` - Cart, checkout and order log through the storefront
//! - `persistence` - File-backed restore, corruption and legacy carts
//! - `filtering` - Saved filters against a catalog
//!
//! Every test gets a fresh storage directory and a pinned clock from
//! [`TestContext`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use luxury_jewelry_storefront::clock::ManualClock;
use luxury_jewelry_storefront::config::StorefrontConfig;
use luxury_jewelry_storefront::extractor::CatalogEntry;
use luxury_jewelry_storefront::state::Storefront;
use luxury_jewelry_storefront::storage::FileStore;
use tempfile::TempDir;

/// A storage directory and clock shared by every storefront a test opens.
pub struct TestContext {
    pub dir: TempDir,
    pub clock: Rc<ManualClock>,
    pub config: StorefrontConfig,
}

impl TestContext {
    /// Fresh context with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StorefrontConfig::default())
    }

    /// Fresh context; `config.storage_dir` is replaced by the temporary
    /// directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn with_config(mut config: StorefrontConfig) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        config.storage_dir = dir.path().to_path_buf();
        Self {
            dir,
            clock: Rc::new(ManualClock::new(start_time())),
            config,
        }
    }

    #[must_use]
    pub fn storage_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Open a storefront over this context's directory, as a new page load
    /// would.
    #[must_use]
    pub fn open(&self) -> Storefront<FileStore> {
        let store = Rc::new(FileStore::new(self.dir.path()));
        Storefront::new(self.config.clone(), store, self.clock.clone())
    }

    /// Write raw text under a storage key, bypassing the stores.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_raw(&self, key: &str, text: &str) {
        std::fs::write(self.dir.path().join(format!("{key}.json")), text)
            .expect("Failed to write raw value");
    }

    /// Raw text stored under `key`, if any.
    #[must_use]
    pub fn read_raw(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.dir.path().join(format!("{key}.json"))).ok()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The instant every test clock starts at.
///
/// # Panics
///
/// Never in practice; the date is valid.
#[must_use]
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 8, 12, 0, 0)
        .single()
        .expect("valid date")
}

/// A catalog entry as the catalog page renders it.
#[must_use]
pub fn entry(
    id: &str,
    name: &str,
    price: &str,
    material: &str,
    category: &str,
    stones: bool,
) -> CatalogEntry {
    CatalogEntry {
        data: [
            ("id", id),
            ("material", material),
            ("category", category),
            ("stones", if stones { "true" } else { "false" }),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
        name: Some(name.to_string()),
        price_text: Some(price.to_string()),
        image: Some(format!("images/{id}.jpg")),
    }
}

/// A small catalog covering every material and a few categories.
#[must_use]
pub fn sample_catalog() -> Vec<CatalogEntry> {
    vec![
        entry("ring-gold", "Кольцо с бриллиантом", "45 000 ₽", "gold", "rings", true),
        entry("ring-silver", "Кольцо классика", "5 000 ₽", "silver", "rings", false),
        entry("earrings-gold", "Серьги капли", "12 500 ₽", "gold", "earrings", true),
        entry("chain-silver", "Цепочка", "3 000 ₽", "silver", "necklaces", false),
        entry("necklace-gold", "Колье", "150 000 ₽", "gold", "necklaces", true),
    ]
}
