//! Ledger-backed [`FractionSource`].

use crate::ledger::AllocationLedger;
use async_trait::async_trait;
use sentiment_types::error::ProviderError;
use sentiment_types::fraction::{self, Fraction};
use sentiment_types::key::AllocationKey;
use sentiment_types::source::FractionSource;
use std::sync::Arc;

/// Answers share queries from an [`AllocationLedger`].
///
/// The share is reduced by [`fraction::normalize`], so the raw weight and
/// total never leave this adapter.
pub struct SentimentProvider {
    ledger: Arc<AllocationLedger>,
}

impl SentimentProvider {
    /// Wrap a ledger.
    pub fn new(ledger: Arc<AllocationLedger>) -> Self {
        Self { ledger }
    }

    /// Share for an already-parsed key.
    pub async fn fraction_for_key(
        &self,
        key: &AllocationKey,
    ) -> Result<Option<Fraction>, ProviderError> {
        let allocations = self
            .ledger
            .list_for_being(key.being(), Some(key.sentiment_type()))
            .await?;
        Ok(allocations
            .iter()
            .find(|a| a.subject_id == *key.subject())
            .map(|a| fraction::normalize(a.weight, a.total_weight_for_type)))
    }
}

#[async_trait]
impl FractionSource for SentimentProvider {
    async fn fraction_for(&self, record_id: &str) -> Result<Option<Fraction>, ProviderError> {
        let key = AllocationKey::parse(record_id)
            .map_err(|_| ProviderError::InvalidRecordId(record_id.to_string()))?;
        let answer = self.fraction_for_key(&key).await?;
        tracing::debug!(record_id, found = answer.is_some(), "sentiment.provider.lookup");
        Ok(answer)
    }
}
