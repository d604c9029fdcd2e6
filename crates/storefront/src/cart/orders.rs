//! Append-only log of placed orders.
//!
//! Entries are kept as raw JSON values. Ones that do not decode as an
//! [`Order`] (logs written by older storefront versions, hand-edited data)
//! are skipped when listing but written back untouched on every append.

use luxury_jewelry_core::{Order, OrderId};
use serde_json::Value;
use tracing::{info, warn};

use crate::storage::{KeyValueStore, StorageError, read_json, read_json_or_none, write_json};

/// The persisted list of orders, oldest first.
#[derive(Debug, Clone)]
pub struct OrderLog<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> OrderLog<S> {
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// All recorded orders that decode. A corrupt log reads as empty.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(order) => Some(order),
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Skipping undecodable order");
                    None
                }
            })
            .collect()
    }

    /// Highest order id recorded so far, including entries that do not
    /// otherwise decode.
    #[must_use]
    pub fn latest_id(&self) -> Option<OrderId> {
        self.entries()
            .iter()
            .filter_map(|entry| entry.get("id").and_then(Value::as_i64))
            .max()
            .map(OrderId::new)
    }

    /// Append `order` and write the whole log back.
    ///
    /// Existing entries are preserved as stored, whether or not they decode.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupt`] if the stored log is not a JSON
    /// array (nothing is written then), or an error if the log cannot be
    /// read or written.
    pub fn append(&self, order: &Order) -> Result<(), StorageError> {
        let mut entries: Vec<Value> = read_json(&self.storage, &self.key)?.unwrap_or_default();
        let entry = serde_json::to_value(order).map_err(|source| StorageError::Serialize {
            key: self.key.clone(),
            source,
        })?;
        entries.push(entry);
        write_json(&self.storage, &self.key, &entries)?;

        info!(order_id = %order.id, total = order.total.minor(), orders = entries.len(), "Recorded order");
        Ok(())
    }

    fn entries(&self) -> Vec<Value> {
        read_json_or_none(&self.storage, &self.key).unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::{TimeZone, Utc};
    use luxury_jewelry_core::Price;

    use super::*;
    use crate::storage::MemoryStore;

    fn order(id: i64) -> Order {
        Order {
            id: OrderId::new(id),
            created_at: Utc.timestamp_millis_opt(id).unwrap(),
            line_items: Vec::new(),
            subtotal: Price::new(1_000),
            total: Price::new(1_000),
        }
    }

    #[test]
    fn test_append_preserves_existing_orders() {
        let store = MemoryStore::new();
        let log = OrderLog::new(&store, "orders");

        log.append(&order(1)).unwrap();
        log.append(&order(2)).unwrap();

        let orders = log.orders();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, OrderId::new(1));
        assert_eq!(log.latest_id(), Some(OrderId::new(2)));
    }

    #[test]
    fn test_corrupt_log_reads_empty() {
        let store = MemoryStore::new();
        store.set("orders", "[{]").unwrap();
        let log = OrderLog::new(&store, "orders");
        assert!(log.orders().is_empty());
        assert_eq!(log.latest_id(), None);

        // The unreadable log is left in place rather than overwritten
        assert!(matches!(
            log.append(&order(5)),
            Err(StorageError::Corrupt { .. })
        ));
        assert_eq!(store.get("orders").unwrap().as_deref(), Some("[{]"));
    }

    #[test]
    fn test_append_keeps_undecodable_entries() {
        let store = MemoryStore::new();
        let older = r#"{"id":1700000000000,"date":"14.11.2023, 22:13:20","items":[{"id":"a","name":"Кольцо","price":5000,"quantity":1}],"subtotal":5000,"total":5000}"#;
        store.set("orders", &format!("[{older}]")).unwrap();
        let log = OrderLog::new(&store, "orders");

        assert!(log.orders().is_empty());
        assert_eq!(log.latest_id(), Some(OrderId::new(1_700_000_000_000)));

        log.append(&order(1_772_971_200_000)).unwrap();

        let stored: Vec<Value> = read_json(&store, "orders").unwrap().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0], serde_json::from_str::<Value>(older).unwrap());
        assert_eq!(log.orders(), vec![order(1_772_971_200_000)]);
        assert_eq!(log.latest_id(), Some(OrderId::new(1_772_971_200_000)));
    }
}
