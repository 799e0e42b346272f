//! Per-(being, type) write serialization and per-being provisioning.

use sentiment_types::id::{BeingId, SentimentType};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type BudgetScope = (BeingId, SentimentType);

/// Registry of async mutexes, one per budget scope that currently has a
/// writer and one per being that is being provisioned. Entries nobody holds
/// are pruned on the next acquire of the same kind.
#[derive(Default)]
pub(crate) struct BudgetLocks {
    scopes: Mutex<HashMap<BudgetScope, Arc<AsyncMutex<()>>>>,
    beings: Mutex<HashMap<BeingId, Arc<AsyncMutex<()>>>>,
}

fn slot<K: Eq + Hash>(
    table: &Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
    key: K,
) -> Arc<AsyncMutex<()>> {
    let mut table = table.lock().unwrap_or_else(PoisonError::into_inner);
    table.retain(|_, lock| Arc::strong_count(lock) > 1);
    Arc::clone(table.entry(key).or_default())
}

impl BudgetLocks {
    /// Wait for exclusive access to the (being, type) budget.
    pub(crate) async fn acquire(
        &self,
        being: &BeingId,
        sentiment_type: &SentimentType,
    ) -> OwnedMutexGuard<()> {
        slot(&self.scopes, (being.clone(), sentiment_type.clone()))
            .lock_owned()
            .await
    }

    /// Wait for exclusive access to the being record. Always taken after
    /// any budget scope guard, never before.
    pub(crate) async fn acquire_being(&self, being: &BeingId) -> OwnedMutexGuard<()> {
        slot(&self.beings, being.clone()).lock_owned().await
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.scopes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
