use async_trait::async_trait;
use dashmap::DashMap;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::errors::{Result, StoreError};
use crate::store::store_traits::{ChangeKind, LedgerStoreTrait, StoreEvent};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// In-memory reference implementation of the ledger store. Documents are
/// keyed by their full path; atomicity of `adjust_amount` comes from the
/// map's per-entry lock, which holds the shard for the whole
/// read-modify-write.
pub struct MemoryLedgerStore {
    documents: DashMap<String, Value>,
    events: broadcast::Sender<StoreEvent>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        MemoryLedgerStore {
            documents: DashMap::new(),
            events,
        }
    }

    fn emit(&self, kind: ChangeKind, path: &str, document: Option<Value>) {
        // Send fails only when nobody is subscribed.
        let _ = self.events.send(StoreEvent {
            kind,
            path: path.to_string(),
            document,
        });
    }
}

impl Default for MemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStoreTrait for MemoryLedgerStore {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        Ok(self.documents.get(path).map(|entry| entry.value().clone()))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<(String, Value)>> {
        let want = format!("{}/", prefix);
        let children = self
            .documents
            .iter()
            .filter_map(|entry| {
                let rest = entry.key().strip_prefix(&want)?;
                if rest.contains('/') {
                    return None;
                }
                Some((rest.to_string(), entry.value().clone()))
            })
            .collect();
        Ok(children)
    }

    async fn put(&self, path: &str, document: Value) -> Result<()> {
        self.documents.insert(path.to_string(), document.clone());
        self.emit(ChangeKind::Put, path, Some(document));
        Ok(())
    }

    async fn push(&self, prefix: &str, mut document: Value) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        if let Some(object) = document.as_object_mut() {
            object.insert("id".to_string(), Value::String(id.clone()));
        }
        let path = format!("{}/{}", prefix, id);
        self.documents.insert(path.clone(), document.clone());
        self.emit(ChangeKind::Put, &path, Some(document));
        Ok(id)
    }

    async fn update_fields(&self, path: &str, fields: Map<String, Value>) -> Result<()> {
        let updated = {
            let mut entry = self
                .documents
                .get_mut(path)
                .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
            let object = entry
                .value_mut()
                .as_object_mut()
                .ok_or_else(|| StoreError::Malformed {
                    path: path.to_string(),
                    reason: "document is not an object".to_string(),
                })?;
            for (key, value) in fields {
                object.insert(key, value);
            }
            entry.value().clone()
        };
        self.emit(ChangeKind::Update, path, Some(updated));
        Ok(())
    }

    async fn adjust_amount(
        &self,
        path: &str,
        field: &str,
        delta: Decimal,
        floor_zero: bool,
    ) -> Result<Decimal> {
        let (new_value, updated) = {
            let mut entry = self
                .documents
                .get_mut(path)
                .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
            let object = entry
                .value_mut()
                .as_object_mut()
                .ok_or_else(|| StoreError::Malformed {
                    path: path.to_string(),
                    reason: "document is not an object".to_string(),
                })?;
            let current = object
                .get(field)
                .and_then(Value::as_f64)
                .and_then(Decimal::from_f64)
                .ok_or_else(|| StoreError::Malformed {
                    path: path.to_string(),
                    reason: format!("field '{}' is not a number", field),
                })?;
            let mut new_value = current + delta;
            if floor_zero && new_value < Decimal::ZERO {
                new_value = Decimal::ZERO;
            }
            let as_f64 = new_value.to_f64().ok_or_else(|| StoreError::Malformed {
                path: path.to_string(),
                reason: format!("field '{}' is not representable", field),
            })?;
            object.insert(field.to_string(), Value::from(as_f64));
            (new_value, entry.value().clone())
        };
        self.emit(ChangeKind::Update, path, Some(updated));
        Ok(new_value)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        if self.documents.remove(path).is_some() {
            self.emit(ChangeKind::Delete, path, None);
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = MemoryLedgerStore::new();
        store
            .put("users/u1/wallets/w1", json!({"id": "w1", "balance": 10.0}))
            .await
            .unwrap();

        let doc = store.get("users/u1/wallets/w1").await.unwrap().unwrap();
        assert_eq!(doc["balance"], json!(10.0));
        assert!(store.get("users/u1/wallets/w2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn push_assigns_unique_ids() {
        let store = MemoryLedgerStore::new();
        let a = store
            .push("users/u1/transactions/expenses", json!({"amount": 5.0}))
            .await
            .unwrap();
        let b = store
            .push("users/u1/transactions/expenses", json!({"amount": 7.0}))
            .await
            .unwrap();
        assert_ne!(a, b);

        let children = store.list("users/u1/transactions/expenses").await.unwrap();
        assert_eq!(children.len(), 2);
        // Pushed objects carry the generated key as their id field.
        let (id, doc) = &children[0];
        assert_eq!(doc["id"], json!(id.clone()));
    }

    #[tokio::test]
    async fn list_returns_direct_children_only() {
        let store = MemoryLedgerStore::new();
        store
            .put("users/u1/wallets/w1", json!({"id": "w1"}))
            .await
            .unwrap();
        store
            .put("users/u1/transactions/income/t1", json!({"id": "t1"}))
            .await
            .unwrap();

        let wallets = store.list("users/u1/wallets").await.unwrap();
        assert_eq!(wallets.len(), 1);
        // `transactions` has no depth-one children, only nested collections.
        assert!(store.list("users/u1/transactions").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_fields_is_partial_and_requires_existence() {
        let store = MemoryLedgerStore::new();
        store
            .put("users/u1/badges/first_goal", json!({"earned": false, "name": "First Goal"}))
            .await
            .unwrap();

        let mut fields = Map::new();
        fields.insert("earned".to_string(), json!(true));
        store
            .update_fields("users/u1/badges/first_goal", fields)
            .await
            .unwrap();

        let doc = store.get("users/u1/badges/first_goal").await.unwrap().unwrap();
        assert_eq!(doc["earned"], json!(true));
        assert_eq!(doc["name"], json!("First Goal"));

        let missing = store
            .update_fields("users/u1/badges/nope", Map::new())
            .await;
        assert!(matches!(
            missing,
            Err(crate::errors::Error::Store(StoreError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn adjust_amount_clamps_at_zero() {
        let store = MemoryLedgerStore::new();
        store
            .put("users/u1/wallets/w1", json!({"balance": 50.0}))
            .await
            .unwrap();

        let balance = store
            .adjust_amount("users/u1/wallets/w1", "balance", dec!(-80), true)
            .await
            .unwrap();
        assert_eq!(balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn concurrent_debits_are_atomic() {
        let store = Arc::new(MemoryLedgerStore::new());
        store
            .put("users/u1/wallets/w1", json!({"balance": 500.0}))
            .await
            .unwrap();

        let first = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .adjust_amount("users/u1/wallets/w1", "balance", dec!(-100), true)
                    .await
            })
        };
        let second = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .adjust_amount("users/u1/wallets/w1", "balance", dec!(-100), true)
                    .await
            })
        };
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let doc = store.get("users/u1/wallets/w1").await.unwrap().unwrap();
        // A lost update under read-then-overwrite would leave 400 here.
        assert_eq!(doc["balance"], json!(300.0));
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let store = MemoryLedgerStore::new();
        let mut events = store.subscribe();

        store
            .put("users/u1/wallets/w1", json!({"balance": 1.0}))
            .await
            .unwrap();
        store.delete("users/u1/wallets/w1").await.unwrap();
        // Deleting again emits nothing.
        store.delete("users/u1/wallets/w1").await.unwrap();

        let put = events.try_recv().unwrap();
        assert_eq!(put.kind, ChangeKind::Put);
        assert_eq!(put.path, "users/u1/wallets/w1");
        let delete = events.try_recv().unwrap();
        assert_eq!(delete.kind, ChangeKind::Delete);
        assert!(events.try_recv().is_err());
    }
}
