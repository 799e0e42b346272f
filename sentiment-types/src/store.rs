//! The Storage protocol: keyed JSON records grouped into tables.

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol ①: Storage
///
/// A generic record store: select, upsert and delete by key, plus a
/// filtered scan of one table.
///
/// Implementations:
/// - MemoryStore: BTreeMap (testing, ephemeral)
/// - FsStore: one JSON file per record
///
/// The trait offers no transactions and no compare-and-swap. Callers that
/// need read-modify-write consistency (the allocation ledger) serialize
/// their own writers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read a record by key. Returns None if it doesn't exist.
    async fn select(&self, key: &RecordKey) -> Result<Option<Record>, StoreError>;

    /// Write a record, creating or replacing it. Returns the stored record.
    async fn upsert(
        &self,
        key: &RecordKey,
        value: serde_json::Value,
    ) -> Result<Record, StoreError>;

    /// Delete a record. No-op if the key doesn't exist.
    async fn delete(&self, key: &RecordKey) -> Result<(), StoreError>;

    /// Scan one table, returning the records whose values match the filter.
    async fn query(&self, table: &str, filter: &Filter) -> Result<Vec<Record>, StoreError>;
}

/// Address of one record: a table name plus an id unique within it.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RecordKey {
    /// Table name.
    pub table: String,
    /// Record id within the table.
    pub id: String,
}

impl RecordKey {
    /// Create a new record key.
    pub fn new(table: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.table, self.id)
    }
}

/// A stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Where the record lives.
    pub key: RecordKey,
    /// The record body.
    pub value: serde_json::Value,
}

/// A conjunction of equality conditions on top-level fields of a record value.
///
/// An empty filter matches every record in the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    conditions: Vec<(String, serde_json::Value)>,
}

impl Filter {
    /// A filter matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add the condition `value[field] == expected`.
    pub fn where_eq(
        mut self,
        field: impl Into<String>,
        expected: impl Into<serde_json::Value>,
    ) -> Self {
        self.conditions.push((field.into(), expected.into()));
        self
    }

    /// The conditions, in insertion order.
    pub fn conditions(&self) -> &[(String, serde_json::Value)] {
        &self.conditions
    }

    /// Whether a record value satisfies every condition.
    /// Non-object values only match the empty filter.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| value.get(field) == Some(expected))
    }
}
