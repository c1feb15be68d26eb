use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tokio::sync::broadcast;

use crate::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Put,
    Update,
    Delete,
}

/// Push-style change notification emitted by the store. Delivery order is
/// not guaranteed across concurrent writers.
#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub kind: ChangeKind,
    pub path: String,
    pub document: Option<Value>,
}

/// Boundary to the hierarchical per-user document store. All persistent
/// state in the application lives behind this trait; domain repositories
/// are thin typed layers over it.
#[async_trait]
pub trait LedgerStoreTrait: Send + Sync {
    /// One-shot read of a single document.
    async fn get(&self, path: &str) -> Result<Option<Value>>;

    /// Direct children of a collection path, as `(child_id, document)`.
    async fn list(&self, prefix: &str) -> Result<Vec<(String, Value)>>;

    /// Whole-record write.
    async fn put(&self, path: &str, document: Value) -> Result<()>;

    /// Unique-key creation under a collection path. When the document is
    /// a JSON object, its `id` field is set to the generated key.
    async fn push(&self, prefix: &str, document: Value) -> Result<String>;

    /// Field-level partial update. Errors with `StoreError::NotFound`
    /// when no document exists at `path`.
    async fn update_fields(&self, path: &str, fields: Map<String, Value>) -> Result<()>;

    /// Atomic numeric read-modify-write of a single field. Returns the
    /// new value. With `floor_zero`, a result below zero is clamped.
    async fn adjust_amount(
        &self,
        path: &str,
        field: &str,
        delta: Decimal,
        floor_zero: bool,
    ) -> Result<Decimal>;

    /// Removes a document. Deleting a missing path is a no-op.
    async fn delete(&self, path: &str) -> Result<()>;

    /// Subscribes to change notifications for the whole tree.
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}
