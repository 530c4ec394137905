//! In-memory storage of submitted records.
//!
//! Records are kept as normalized JSON objects, one list per form kind, in
//! insertion order. Ids are assigned from a single counter shared by all
//! kinds.

use common::forms::FormKind;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,
    #[error("Record id is required")]
    MissingId,
}

/// A clonable, thread-safe handle to the stored records.
///
/// Shared across Actix workers as part of the application state; clones see
/// the same data.
#[derive(Clone, Default)]
pub struct RecordStore {
    records: Arc<RwLock<HashMap<FormKind, Vec<Value>>>>,
    last_id: Arc<AtomicI64>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose first assigned id is `last_id + 1`.
    pub fn starting_after(last_id: i64) -> Self {
        Self {
            records: Arc::default(),
            last_id: Arc::new(AtomicI64::new(last_id)),
        }
    }

    pub async fn list(&self, kind: FormKind) -> Vec<Value> {
        let records = self.records.read().await;
        records.get(&kind).cloned().unwrap_or_default()
    }

    /// Stores a new record under a fresh id and returns the id.
    /// Any id in `record` is replaced.
    pub async fn create(&self, kind: FormKind, mut record: Map<String, Value>) -> i64 {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        record.insert("id".to_string(), Value::from(id));

        let mut records = self.records.write().await;
        records.entry(kind).or_default().push(Value::Object(record));
        id
    }

    /// Replaces the stored record with the same id.
    pub async fn update(
        &self,
        kind: FormKind,
        record: Map<String, Value>,
    ) -> Result<i64, StoreError> {
        let id = record
            .get("id")
            .and_then(Value::as_i64)
            .ok_or(StoreError::MissingId)?;

        let mut records = self.records.write().await;
        let slot = records
            .get_mut(&kind)
            .and_then(|list| {
                list.iter_mut()
                    .find(|r| r.get("id").and_then(Value::as_i64) == Some(id))
            })
            .ok_or(StoreError::NotFound)?;
        *slot = Value::Object(record);
        Ok(id)
    }
}
