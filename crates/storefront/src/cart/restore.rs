//! Restoring cart state from storage.
//!
//! Stored carts are read line by line so a single malformed entry does not
//! discard the rest. Restored lines are normalized back into cart invariants:
//! quantities below one are dropped and repeated ids are merged into the first
//! occurrence.

use luxury_jewelry_core::{CartLineItem, Material, Price, ProductId, Quantity};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageError, read_json, read_json_or_none};

/// Outcome of restoring the cart.
#[derive(Debug, Default)]
pub(crate) struct Restored {
    pub lines: Vec<CartLineItem>,
    /// Entries that were dropped or merged while restoring.
    pub repaired: usize,
}

/// A line as found in storage, before invariants are checked.
#[derive(Debug, Deserialize)]
struct StoredLine {
    id: ProductId,
    name: String,
    #[serde(rename = "price")]
    unit_price: Price,
    #[serde(rename = "image", default)]
    image_ref: String,
    #[serde(default)]
    material: Material,
    #[serde(default)]
    category: String,
    quantity: i64,
}

/// A line written by the legacy name-keyed cart.
#[derive(Debug, Deserialize)]
struct LegacyLine {
    id: ProductId,
    name: String,
    price: Price,
    #[serde(default = "one")]
    quantity: i64,
}

const fn one() -> i64 {
    1
}

/// Read the cart stored under `key`.
///
/// Missing, unreadable or corrupt state restores as an empty cart.
pub(crate) fn restore_cart<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Restored {
    let Some(entries) = read_json_or_none::<_, Vec<Value>>(store, key) else {
        return Restored::default();
    };

    let mut restored = Restored::default();
    for entry in entries {
        let line = match serde_json::from_value::<StoredLine>(entry) {
            Ok(line) => line,
            Err(e) => {
                warn!(key, error = %e, "Dropping malformed cart line");
                restored.repaired += 1;
                continue;
            }
        };

        let Ok(quantity) = Quantity::try_from(line.quantity) else {
            debug!(id = %line.id, quantity = line.quantity, "Dropping cart line with invalid quantity");
            restored.repaired += 1;
            continue;
        };

        let item = CartLineItem {
            id: line.id,
            name: line.name,
            unit_price: line.unit_price,
            image_ref: line.image_ref,
            material: line.material,
            category: line.category,
            quantity,
        };
        if merge_into(&mut restored.lines, item) {
            restored.repaired += 1;
        }
    }
    restored
}

/// Append `item`, or fold its quantity into an existing line with the same
/// id. Returns `true` if it was merged.
fn merge_into(lines: &mut Vec<CartLineItem>, item: CartLineItem) -> bool {
    if let Some(existing) = lines.iter_mut().find(|line| line.id == item.id) {
        existing.quantity = existing.quantity.saturating_add(item.quantity);
        true
    } else {
        lines.push(item);
        false
    }
}

/// Fold the legacy name-keyed cart stored under `legacy_key` into `lines`.
///
/// Legacy entries whose name matches an existing line add to its quantity;
/// others are appended with a `legacy-` prefixed id. Returns `None` when there
/// is no legacy cart to migrate, otherwise the number of entries taken over.
/// Corrupt legacy data migrates nothing but still reports `Some(0)` so the
/// caller discards it.
pub(crate) fn migrate_legacy<S: KeyValueStore + ?Sized>(
    store: &S,
    legacy_key: &str,
    lines: &mut Vec<CartLineItem>,
) -> Option<usize> {
    let entries: Vec<Value> = match read_json(store, legacy_key) {
        Ok(Some(entries)) => entries,
        Ok(None) => return None,
        Err(e @ StorageError::Corrupt { .. }) => {
            warn!(key = legacy_key, error = %e, "Discarding corrupt legacy cart");
            return Some(0);
        }
        Err(e) => {
            warn!(key = legacy_key, error = %e, "Legacy cart unreadable, leaving it in place");
            return None;
        }
    };

    let mut migrated = 0;
    for entry in entries {
        let Ok(legacy) = serde_json::from_value::<LegacyLine>(entry) else {
            continue;
        };
        let Ok(quantity) = Quantity::try_from(legacy.quantity) else {
            continue;
        };

        if let Some(existing) = lines.iter_mut().find(|line| line.name == legacy.name) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            lines.push(CartLineItem {
                id: ProductId::new(format!("legacy-{}", legacy.id)),
                name: legacy.name,
                unit_price: legacy.price,
                image_ref: String::new(),
                material: Material::None,
                category: String::new(),
                quantity,
            });
        }
        migrated += 1;
    }
    Some(migrated)
}
