//! StaticSource: answers share queries from a fixed table.

use crate::error::ProviderError;
use crate::fraction::Fraction;
use crate::source::FractionSource;
use async_trait::async_trait;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Answer {
    Share(Fraction),
    Fail(String),
}

/// A [`FractionSource`] with canned answers. Unknown ids yield `Ok(None)`.
///
/// Answers are not validated, so a test can hand the server a fraction the
/// client must reject.
#[derive(Debug, Default)]
pub struct StaticSource {
    answers: HashMap<String, Answer>,
}

impl StaticSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `record_id` with the given numerator and denominator.
    pub fn with_fraction(mut self, record_id: &str, numerator: u64, denominator: u64) -> Self {
        self.answers.insert(
            record_id.to_owned(),
            Answer::Share(Fraction {
                numerator,
                denominator,
            }),
        );
        self
    }

    /// Fail lookups of `record_id` with the given message.
    pub fn with_failure(mut self, record_id: &str, message: &str) -> Self {
        self.answers
            .insert(record_id.to_owned(), Answer::Fail(message.to_owned()));
        self
    }
}

#[async_trait]
impl FractionSource for StaticSource {
    async fn fraction_for(&self, record_id: &str) -> Result<Option<Fraction>, ProviderError> {
        match self.answers.get(record_id) {
            Some(Answer::Share(fraction)) => Ok(Some(*fraction)),
            Some(Answer::Fail(message)) => Err(ProviderError::Other(message.clone().into())),
            None => Ok(None),
        }
    }
}
