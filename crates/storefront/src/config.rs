//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `JEWELRY_STORAGE_DIR` - Directory for file-backed storage (default: .jewelry-storage)
//! - `JEWELRY_CART_KEY` - Storage key of the cart (default: luxuryJewelryCart)
//! - `JEWELRY_ORDERS_KEY` - Storage key of the order log (default: luxuryJewelryOrders)
//! - `JEWELRY_LEGACY_CART_KEY` - Storage key of the legacy name-keyed cart (default: jewelryCart)
//! - `JEWELRY_FILTERS_KEY` - Storage key of the saved filter (default: jewelryFilters)
//! - `JEWELRY_FREE_SHIPPING_THRESHOLD` - Subtotal from which delivery is free (default: 15000)
//! - `JEWELRY_FLAT_SHIPPING_FEE` - Delivery fee below the threshold (default: 300)
//! - `JEWELRY_ORDER_TOTAL_INCLUDES_SHIPPING` - Record shipping in order totals (default: false)
//! - `JEWELRY_DEFAULT_MAX_PRICE` - Price ceiling when no filter is saved (default: 100000)
//! - `JEWELRY_BUTTON_REVERT_MS` - Delay before an "added" button reverts (default: 2000)
//! - `JEWELRY_TOAST_DISMISS_MS` - Delay before a toast is dismissed (default: 3000)

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::TimeDelta;
use luxury_jewelry_core::{DEFAULT_MAX_PRICE, Price};
use thiserror::Error;

use crate::cart::ShippingPolicy;

const DEFAULT_STORAGE_DIR: &str = ".jewelry-storage";
const DEFAULT_CART_KEY: &str = "luxuryJewelryCart";
const DEFAULT_ORDERS_KEY: &str = "luxuryJewelryOrders";
const DEFAULT_LEGACY_CART_KEY: &str = "jewelryCart";
const DEFAULT_FILTERS_KEY: &str = "jewelryFilters";
const DEFAULT_BUTTON_REVERT_MS: i64 = 2_000;
const DEFAULT_TOAST_DISMISS_MS: i64 = 3_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory used by file-backed storage
    pub storage_dir: PathBuf,
    /// Cart, shipping and order settings
    pub cart: CartConfig,
    /// Catalog filter settings
    pub filters: FilterConfig,
    /// Delays for transient UI effects
    pub ui: UiConfig,
}

/// Cart and checkout settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Storage key of the cart line items
    pub storage_key: String,
    /// Storage key of the append-only order log
    pub orders_key: String,
    /// Storage key of the legacy name-keyed cart, migrated on startup
    pub legacy_key: String,
    /// Free-shipping threshold and flat fee
    pub shipping: ShippingPolicy,
    /// Whether an order's recorded total includes shipping
    pub order_total_includes_shipping: bool,
}

/// Catalog filter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Storage key of the saved filter spec
    pub storage_key: String,
    /// Price ceiling applied when no filter is saved
    pub default_max_price: Price,
}

/// Delays for scheduled UI effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiConfig {
    /// How long an "added to cart" button keeps its confirmation label
    pub button_revert_delay: TimeDelta,
    /// How long a toast stays visible
    pub toast_dismiss_delay: TimeDelta,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            cart: CartConfig::default(),
            filters: FilterConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_CART_KEY.to_string(),
            orders_key: DEFAULT_ORDERS_KEY.to_string(),
            legacy_key: DEFAULT_LEGACY_CART_KEY.to_string(),
            shipping: ShippingPolicy::default(),
            order_total_includes_shipping: false,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_FILTERS_KEY.to_string(),
            default_max_price: DEFAULT_MAX_PRICE,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            button_revert_delay: TimeDelta::milliseconds(DEFAULT_BUTTON_REVERT_MS),
            toast_dismiss_delay: TimeDelta::milliseconds(DEFAULT_TOAST_DISMISS_MS),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_dir = PathBuf::from(get_or_default(
            &lookup,
            "JEWELRY_STORAGE_DIR",
            DEFAULT_STORAGE_DIR,
        ));

        let cart = CartConfig {
            storage_key: get_key(&lookup, "JEWELRY_CART_KEY", DEFAULT_CART_KEY)?,
            orders_key: get_key(&lookup, "JEWELRY_ORDERS_KEY", DEFAULT_ORDERS_KEY)?,
            legacy_key: get_key(&lookup, "JEWELRY_LEGACY_CART_KEY", DEFAULT_LEGACY_CART_KEY)?,
            shipping: ShippingPolicy {
                free_threshold: Price::new(parse_or_default(
                    &lookup,
                    "JEWELRY_FREE_SHIPPING_THRESHOLD",
                    ShippingPolicy::DEFAULT_FREE_THRESHOLD.minor(),
                )?),
                flat_fee: Price::new(parse_or_default(
                    &lookup,
                    "JEWELRY_FLAT_SHIPPING_FEE",
                    ShippingPolicy::DEFAULT_FLAT_FEE.minor(),
                )?),
            },
            order_total_includes_shipping: parse_bool_or_default(
                &lookup,
                "JEWELRY_ORDER_TOTAL_INCLUDES_SHIPPING",
                false,
            )?,
        };

        let filters = FilterConfig {
            storage_key: get_key(&lookup, "JEWELRY_FILTERS_KEY", DEFAULT_FILTERS_KEY)?,
            default_max_price: Price::new(parse_or_default(
                &lookup,
                "JEWELRY_DEFAULT_MAX_PRICE",
                DEFAULT_MAX_PRICE.minor(),
            )?),
        };

        let ui = UiConfig {
            button_revert_delay: get_delay(
                &lookup,
                "JEWELRY_BUTTON_REVERT_MS",
                DEFAULT_BUTTON_REVERT_MS,
            )?,
            toast_dismiss_delay: get_delay(
                &lookup,
                "JEWELRY_TOAST_DISMISS_MS",
                DEFAULT_TOAST_DISMISS_MS,
            )?,
        };

        Ok(Self {
            storage_dir,
            cart,
            filters,
            ui,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Get a storage key, rejecting blank values.
fn get_key<F>(lookup: &F, key: &str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = get_or_default(lookup, key, default);
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "storage key cannot be empty".to_string(),
        ));
    }
    Ok(value)
}

/// Parse a variable, falling back to `default` when unset.
fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a boolean flag (`true`/`false`/`1`/`0`/`yes`/`no`).
fn parse_bool_or_default<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got {other:?}"),
        )),
    }
}

/// Parse a delay given in milliseconds.
fn get_delay<F>(lookup: &F, key: &str, default_ms: i64) -> Result<TimeDelta, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let ms: i64 = parse_or_default(lookup, key, default_ms)?;
    if ms < 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "delay cannot be negative".to_string(),
        ));
    }
    TimeDelta::try_milliseconds(ms).ok_or_else(|| {
        ConfigError::InvalidEnvVar(key.to_string(), format!("{ms}ms is out of range"))
    })
}
