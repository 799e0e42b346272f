//! The allocation ledger.

use crate::config::LedgerConfig;
use crate::locks::BudgetLocks;
use crate::model::{AllocationRow, Being, SentimentAllocation};
use sentiment_types::error::LedgerError;
use sentiment_types::id::{BeingId, SentimentType, SubjectId};
use sentiment_types::key::AllocationKey;
use sentiment_types::store::{Filter, RecordKey, RecordStore};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Table holding one record per allocation, keyed by [`AllocationKey`].
pub const ALLOCATION_TABLE: &str = "sentiment_allocation";

/// Table holding one record per being, keyed by being id.
pub const BEING_TABLE: &str = "being";

/// Per-(being, type) weighted budget store over a [`RecordStore`].
///
/// Records exist only while their weight is positive: an upsert with weight
/// zero deletes. Totals and ratios are computed at read time from whatever
/// the store holds.
pub struct AllocationLedger {
    store: Arc<dyn RecordStore>,
    config: LedgerConfig,
    locks: BudgetLocks,
}

fn non_negative(field: &str, value: i64) -> Result<u64, LedgerError> {
    u64::try_from(value).map_err(|_| {
        LedgerError::Validation(format!("{field} must be a non-negative integer, got {value}"))
    })
}

fn allocation_key(key: &AllocationKey) -> RecordKey {
    RecordKey::new(ALLOCATION_TABLE, key.to_string())
}

fn sum_weights<'a>(mut weights: impl Iterator<Item = &'a u64>) -> Result<u64, LedgerError> {
    weights.try_fold(0u64, |acc, w| {
        acc.checked_add(*w)
            .ok_or_else(|| LedgerError::Validation("total weight overflows u64".to_string()))
    })
}

impl AllocationLedger {
    /// Create a ledger with the default configuration.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_config(store, LedgerConfig::default())
    }

    /// Create a ledger with an explicit configuration.
    pub fn with_config(store: Arc<dyn RecordStore>, config: LedgerConfig) -> Self {
        Self {
            store,
            config,
            locks: BudgetLocks::default(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Look up a being.
    pub async fn being(&self, id: &BeingId) -> Result<Option<Being>, LedgerError> {
        let key = RecordKey::new(BEING_TABLE, id.as_str());
        match self.store.select(&key).await? {
            Some(record) => {
                let being = serde_json::from_value(record.value).map_err(|e| {
                    LedgerError::CorruptRecord {
                        id: record.key.id,
                        reason: e.to_string(),
                    }
                })?;
                Ok(Some(being))
            }
            None => Ok(None),
        }
    }

    /// Make sure a being exists, creating it with `name` if it does not.
    /// An existing being is returned unchanged.
    ///
    /// Provisioning is serialized per being on this ledger, so a concurrent
    /// auto-provisioning upsert cannot replace the name written here.
    pub async fn ensure_being(&self, id: &BeingId, name: &str) -> Result<Being, LedgerError> {
        if id.as_str().is_empty() {
            return Err(LedgerError::Validation("being id must not be empty".to_string()));
        }
        let _guard = self.locks.acquire_being(id).await;
        if let Some(existing) = self.being(id).await? {
            return Ok(existing);
        }
        let being = Being {
            id: id.clone(),
            name: name.to_string(),
        };
        let value = serde_json::to_value(&being).map_err(|e| LedgerError::CorruptRecord {
            id: id.to_string(),
            reason: e.to_string(),
        })?;
        self.store
            .upsert(&RecordKey::new(BEING_TABLE, id.as_str()), value)
            .await?;
        tracing::info!(being = %id, being_name = name, "sentiment.ledger.being_provisioned");
        Ok(being)
    }

    /// Set the weight `being` allocates to `subject` under `sentiment_type`.
    ///
    /// When `max_weight` is given, the write is rejected with
    /// [`LedgerError::AllocationExceeded`] if the (being, type) total
    /// including this weight would exceed it; nothing is written in that
    /// case. A weight of zero deletes the allocation and returns `None`.
    pub async fn upsert(
        &self,
        being: &BeingId,
        subject: &SubjectId,
        sentiment_type: &SentimentType,
        weight: i64,
        max_weight: Option<i64>,
    ) -> Result<Option<SentimentAllocation>, LedgerError> {
        let weight = non_negative("weight", weight)?;
        let max_weight = max_weight
            .map(|m| non_negative("maxWeight", m))
            .transpose()?;
        let key = AllocationKey::new(being.clone(), sentiment_type.clone(), subject.clone())?;
        let record_key = allocation_key(&key);

        let _guard = if self.config.serialize_writes {
            Some(self.locks.acquire(being, sentiment_type).await)
        } else {
            None
        };

        let rows = self.rows_for(being, Some(sentiment_type)).await?;
        let other_total = sum_weights(
            rows.iter()
                .filter(|row| row.subject_id != *subject)
                .map(|row| &row.weight),
        )?;
        let new_total = other_total.checked_add(weight).ok_or_else(|| {
            LedgerError::Validation("total weight overflows u64".to_string())
        })?;

        if let Some(max) = max_weight {
            if new_total > max {
                tracing::info!(
                    being = %being,
                    sentiment_type = %sentiment_type,
                    subject = %subject,
                    attempted_total = new_total,
                    max_weight = max,
                    "sentiment.ledger.allocation_exceeded"
                );
                return Err(LedgerError::AllocationExceeded {
                    being: being.clone(),
                    sentiment_type: sentiment_type.clone(),
                    attempted_total: new_total,
                    max_weight: max,
                });
            }
        }

        if weight == 0 {
            self.store.delete(&record_key).await?;
            tracing::debug!(key = %key, "sentiment.ledger.cleared");
            return Ok(None);
        }

        self.require_being(being).await?;

        let row = AllocationRow::new(&key, weight, max_weight);
        self.store.upsert(&record_key, row.to_value()?).await?;
        tracing::debug!(key = %key, weight, total = new_total, "sentiment.ledger.upsert");
        Ok(Some(SentimentAllocation::from_row(row, new_total)))
    }

    /// All allocations of `being`, optionally restricted to one type, each
    /// with its share of the per-type total. Sorted by type, then subject.
    pub async fn list_for_being(
        &self,
        being: &BeingId,
        sentiment_type: Option<&SentimentType>,
    ) -> Result<Vec<SentimentAllocation>, LedgerError> {
        let rows = self.rows_for(being, sentiment_type).await?;

        let mut by_type: BTreeMap<SentimentType, Vec<AllocationRow>> = BTreeMap::new();
        for row in rows {
            by_type.entry(row.sentiment_type.clone()).or_default().push(row);
        }

        let mut allocations = Vec::new();
        for (_, mut group) in by_type {
            let total = sum_weights(group.iter().map(|row| &row.weight))?;
            group.sort_by(|a, b| a.subject_id.cmp(&b.subject_id));
            allocations.extend(
                group
                    .into_iter()
                    .map(|row| SentimentAllocation::from_row(row, total)),
            );
        }
        Ok(allocations)
    }

    /// Delete an allocation. Absence is not an error.
    pub async fn remove(
        &self,
        being: &BeingId,
        subject: &SubjectId,
        sentiment_type: &SentimentType,
    ) -> Result<(), LedgerError> {
        let key = AllocationKey::new(being.clone(), sentiment_type.clone(), subject.clone())?;
        let _guard = if self.config.serialize_writes {
            Some(self.locks.acquire(being, sentiment_type).await)
        } else {
            None
        };
        self.store.delete(&allocation_key(&key)).await?;
        tracing::debug!(key = %key, "sentiment.ledger.remove");
        Ok(())
    }

    async fn rows_for(
        &self,
        being: &BeingId,
        sentiment_type: Option<&SentimentType>,
    ) -> Result<Vec<AllocationRow>, LedgerError> {
        let mut filter = Filter::all().where_eq("beingId", being.as_str());
        if let Some(kind) = sentiment_type {
            filter = filter.where_eq("type", kind.as_str());
        }
        self.store
            .query(ALLOCATION_TABLE, &filter)
            .await?
            .into_iter()
            .map(AllocationRow::from_record)
            .collect()
    }

    async fn require_being(&self, being: &BeingId) -> Result<(), LedgerError> {
        if self.config.auto_provision_beings {
            self.ensure_being(being, &self.config.placeholder_being_name)
                .await?;
            return Ok(());
        }
        match self.being(being).await? {
            Some(_) => Ok(()),
            None => Err(LedgerError::UnknownBeing(being.clone())),
        }
    }
}
