//! The Source protocol: answering share queries by record id.

use crate::error::ProviderError;
use crate::fraction::Fraction;
use async_trait::async_trait;

/// Protocol ③: Source
///
/// Answers "what fraction of the being's total weight for this type went to
/// this subject" for a record id of the form `<being>:<type>:<subject>`.
///
/// `Ok(None)` means the allocation does not exist. That is a valid answer,
/// not an error.
#[async_trait]
pub trait FractionSource: Send + Sync {
    /// Look up the share for `record_id`.
    async fn fraction_for(&self, record_id: &str) -> Result<Option<Fraction>, ProviderError>;
}
