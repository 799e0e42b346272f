//! Row shapes stored by the ledger and the views it returns.

use sentiment_types::error::LedgerError;
use sentiment_types::id::{BeingId, SentimentType, SubjectId};
use sentiment_types::key::AllocationKey;
use sentiment_types::store::Record;
use serde::{Deserialize, Serialize};

/// A principal that owns allocation budgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Being {
    /// Being id.
    pub id: BeingId,
    /// Display name.
    pub name: String,
}

/// An allocation together with its read-time share of the type total.
///
/// Derived, never persisted. `ratio` is `weight / total_weight_for_type`,
/// or `0.0` when the total is zero. `max_weight` is the ceiling that was
/// supplied on the write that produced the stored weight, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAllocation {
    /// Owner of the budget.
    pub being_id: BeingId,
    /// Sentiment type the weight is allocated under.
    #[serde(rename = "type")]
    pub sentiment_type: SentimentType,
    /// Subject receiving the weight.
    pub subject_id: SubjectId,
    /// Allocated weight.
    pub weight: u64,
    /// Sum of all weights sharing this being and type.
    pub total_weight_for_type: u64,
    /// `weight / total_weight_for_type`.
    pub ratio: f64,
    /// Ceiling used on the triggering write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<u64>,
}

impl SentimentAllocation {
    pub(crate) fn from_row(row: AllocationRow, total_weight_for_type: u64) -> Self {
        let ratio = if total_weight_for_type == 0 {
            0.0
        } else {
            row.weight as f64 / total_weight_for_type as f64
        };
        Self {
            being_id: row.being_id,
            sentiment_type: row.sentiment_type,
            subject_id: row.subject_id,
            weight: row.weight,
            total_weight_for_type,
            ratio,
            max_weight: row.max_weight,
        }
    }

    /// The composite key of this allocation.
    pub fn key(&self) -> Result<AllocationKey, LedgerError> {
        Ok(AllocationKey::new(
            self.being_id.clone(),
            self.sentiment_type.clone(),
            self.subject_id.clone(),
        )?)
    }
}

/// The persisted body of an allocation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AllocationRow {
    pub being_id: BeingId,
    #[serde(rename = "type")]
    pub sentiment_type: SentimentType,
    pub subject_id: SubjectId,
    pub weight: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<u64>,
}

impl AllocationRow {
    pub(crate) fn new(key: &AllocationKey, weight: u64, max_weight: Option<u64>) -> Self {
        Self {
            being_id: key.being().clone(),
            sentiment_type: key.sentiment_type().clone(),
            subject_id: key.subject().clone(),
            weight,
            max_weight,
        }
    }

    pub(crate) fn from_record(record: Record) -> Result<Self, LedgerError> {
        serde_json::from_value(record.value).map_err(|e| LedgerError::CorruptRecord {
            id: record.key.id,
            reason: e.to_string(),
        })
    }

    pub(crate) fn to_value(&self) -> Result<serde_json::Value, LedgerError> {
        serde_json::to_value(self).map_err(|e| LedgerError::CorruptRecord {
            id: format!("{}:{}:{}", self.being_id, self.sentiment_type, self.subject_id),
            reason: e.to_string(),
        })
    }
}
