//! The typed `(being, type, subject)` composite key.
//!
//! The text form is `<being>:<type>:<subject>`. Components may not be empty
//! and may not contain the `:` separator, so [`AllocationKey::parse`] and
//! [`Display`](std::fmt::Display) are exact inverses for every key that can
//! be constructed.

use crate::id::{BeingId, SentimentType, SubjectId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between key components in the text form.
pub const SEPARATOR: char = ':';

/// Why a key could not be built or parsed.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// A component was empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// A component contained the separator.
    #[error("{component} must not contain ':': {value:?}")]
    ContainsSeparator {
        /// Which component.
        component: &'static str,
        /// The offending value.
        value: String,
    },

    /// The text form did not have exactly three non-empty segments.
    #[error("expected <being>:<type>:<subject>, got {0:?}")]
    Malformed(String),
}

/// Composite key identifying one allocation.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AllocationKey {
    being: BeingId,
    sentiment_type: SentimentType,
    subject: SubjectId,
}

fn check(component: &'static str, value: &str) -> Result<(), KeyError> {
    if value.is_empty() {
        return Err(KeyError::Empty(component));
    }
    if value.contains(SEPARATOR) {
        return Err(KeyError::ContainsSeparator {
            component,
            value: value.to_owned(),
        });
    }
    Ok(())
}

impl AllocationKey {
    /// Build a key, validating every component.
    pub fn new(
        being: BeingId,
        sentiment_type: SentimentType,
        subject: SubjectId,
    ) -> Result<Self, KeyError> {
        check("being id", being.as_str())?;
        check("sentiment type", sentiment_type.as_str())?;
        check("subject id", subject.as_str())?;
        Ok(Self {
            being,
            sentiment_type,
            subject,
        })
    }

    /// Parse the `<being>:<type>:<subject>` text form.
    pub fn parse(text: &str) -> Result<Self, KeyError> {
        let segments: Vec<&str> = text.split(SEPARATOR).collect();
        match segments.as_slice() {
            [being, sentiment_type, subject]
                if !being.is_empty() && !sentiment_type.is_empty() && !subject.is_empty() =>
            {
                Ok(Self {
                    being: BeingId::from(*being),
                    sentiment_type: SentimentType::from(*sentiment_type),
                    subject: SubjectId::from(*subject),
                })
            }
            _ => Err(KeyError::Malformed(text.to_owned())),
        }
    }

    /// The being that owns the allocation.
    pub fn being(&self) -> &BeingId {
        &self.being
    }

    /// The sentiment type the allocation is made under.
    pub fn sentiment_type(&self) -> &SentimentType {
        &self.sentiment_type
    }

    /// The subject receiving the allocation.
    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }
}

impl fmt::Display for AllocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.being,
            self.sentiment_type,
            self.subject,
            sep = SEPARATOR
        )
    }
}

impl FromStr for AllocationKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
