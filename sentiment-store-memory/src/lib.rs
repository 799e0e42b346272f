#![deny(missing_docs)]
//! In-memory implementation of the [`RecordStore`] trait.
//!
//! Uses a `BTreeMap` behind a `RwLock` for concurrent access. Records are
//! keyed by `(table, id)`, so tables are fully isolated and scans come back
//! in id order.

use async_trait::async_trait;
use sentiment_types::error::StoreError;
use sentiment_types::store::{Filter, Record, RecordKey, RecordStore};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-memory record store backed by a `BTreeMap` behind a `RwLock`.
///
/// Suitable for testing, prototyping, and single-process use cases
/// where persistence across restarts is not required.
pub struct MemoryStore {
    data: RwLock<BTreeMap<RecordKey, serde_json::Value>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of records across all tables.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select(&self, key: &RecordKey) -> Result<Option<Record>, StoreError> {
        let data = self.data.read().await;
        Ok(data.get(key).map(|value| Record {
            key: key.clone(),
            value: value.clone(),
        }))
    }

    async fn upsert(
        &self,
        key: &RecordKey,
        value: serde_json::Value,
    ) -> Result<Record, StoreError> {
        let mut data = self.data.write().await;
        data.insert(key.clone(), value.clone());
        Ok(Record {
            key: key.clone(),
            value,
        })
    }

    async fn delete(&self, key: &RecordKey) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        data.remove(key);
        Ok(())
    }

    async fn query(&self, table: &str, filter: &Filter) -> Result<Vec<Record>, StoreError> {
        let data = self.data.read().await;
        let records: Vec<Record> = data
            .iter()
            .filter(|(key, value)| key.table == table && filter.matches(value))
            .map(|(key, value)| Record {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        Ok(records)
    }
}
