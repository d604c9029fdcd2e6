//! Reading products out of rendered catalog entries.
//!
//! A catalog entry carries its product data as string attributes (`id`,
//! `material`, `category`, `stones`, optionally `price`) plus the visible name
//! and price text. Entries rendered without an id get one synthesized on first
//! extraction; the id is written back into the entry so later extractions of
//! the same entry agree.

use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use std::sync::LazyLock;

use luxury_jewelry_core::{Material, Price, Product, ProductId};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::clock::Clock;

/// Attribute holding the product id.
pub const ID_ATTR: &str = "id";

const SUFFIX_LEN: usize = 9;
const SUFFIX_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D").expect("Invalid regex"));

/// Errors raised while extracting a product.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// A field required for pricing or display is absent or blank.
    #[error("catalog entry has no {field}")]
    MissingField { field: &'static str },

    /// The price text contains no usable amount.
    #[error("unparseable price {text:?}")]
    InvalidPrice { text: String },
}

/// A product as rendered in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Data attributes, without any `data-` prefix.
    #[serde(default)]
    pub data: BTreeMap<String, String>,
    /// Visible product name.
    #[serde(default)]
    pub name: Option<String>,
    /// Visible price, e.g. `"12 500 ₽"`.
    #[serde(default)]
    pub price_text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl CatalogEntry {
    /// The value of attribute `name`, treating a blank value as absent.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.data
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// The entry's product id, if it has one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr(ID_ATTR)
    }
}

/// Parse a displayed price by discarding everything but digits.
///
/// `"12 500 ₽"` reads as 12500. Fractional parts are not recognized.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidPrice`] if no digits remain or the amount
/// does not fit.
pub fn parse_price(text: &str) -> Result<Price, ExtractError> {
    let digits = NON_DIGITS.replace_all(text, "");
    digits
        .parse::<u64>()
        .map(Price::new)
        .map_err(|_| ExtractError::InvalidPrice {
            text: text.to_string(),
        })
}

/// Turns catalog entries into products, synthesizing ids where needed.
pub struct ProductExtractor {
    clock: Rc<dyn Clock>,
    issued: HashSet<String>,
}

impl ProductExtractor {
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            issued: HashSet::new(),
        }
    }

    /// Extract the product shown by `entry`.
    ///
    /// Name and price are required. Material and category default to empty
    /// and a product has stones only if its `stones` attribute is `"true"`.
    /// If the entry has no id, one is synthesized and stored on the entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or price is missing or the price cannot
    /// be parsed. The entry is not modified in that case.
    pub fn extract(&mut self, entry: &mut CatalogEntry) -> Result<Product, ExtractError> {
        let name = entry
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ExtractError::MissingField { field: "name" })?
            .to_string();

        let price_text = entry
            .price_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or_else(|| entry.attr("price"))
            .ok_or(ExtractError::MissingField { field: "price" })?;
        let price = parse_price(price_text)?;

        let id = match entry.id() {
            Some(id) => id.to_string(),
            None => {
                let id = self.synthesize_id();
                debug!(id = %id, name = %name, "Assigned id to catalog entry");
                entry.data.insert(ID_ATTR.to_string(), id.clone());
                id
            }
        };

        Ok(Product {
            id: ProductId::new(id),
            name,
            price,
            image: entry.image.clone().unwrap_or_default(),
            material: Material::from_attr(entry.attr("material").unwrap_or_default()),
            category: entry.attr("category").unwrap_or_default().to_string(),
            has_stones: entry.attr("stones") == Some("true"),
        })
    }

    /// Extract every entry, skipping the ones that cannot be read.
    pub fn extract_all(&mut self, entries: &mut [CatalogEntry]) -> Vec<Product> {
        entries
            .iter_mut()
            .filter_map(|entry| match self.extract(entry) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(error = %e, name = ?entry.name, "Skipping catalog entry");
                    None
                }
            })
            .collect()
    }

    /// A fresh id: current time in milliseconds followed by a random base-36
    /// suffix. Never repeats within one extractor.
    fn synthesize_id(&mut self) -> String {
        loop {
            let id = format!(
                "{}{}",
                self.clock.now().timestamp_millis(),
                random_suffix(SUFFIX_LEN)
            );
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

impl std::fmt::Debug for ProductExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductExtractor")
            .field("issued", &self.issued.len())
            .finish_non_exhaustive()
    }
}

fn random_suffix(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..SUFFIX_CHARSET.len());
            SUFFIX_CHARSET.get(idx).map_or('0', |b| char::from(*b))
        })
        .collect()
}
