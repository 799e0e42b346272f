//! Millisecond durations for configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A duration stored as whole milliseconds.
///
/// Config files carry timeouts as a bare integer (`"timeout": 5000`) rather
/// than serde's `{"secs", "nanos"}` struct for `std::time::Duration`.
///
/// ```
/// use sentiment_types::DurationMs;
///
/// let timeout: DurationMs = serde_json::from_str("2500").unwrap();
/// assert_eq!(timeout.to_std(), std::time::Duration::from_millis(2500));
/// assert_eq!(timeout.to_string(), "2500ms");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DurationMs(u64);

impl DurationMs {
    /// From milliseconds.
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// From seconds, saturating at `u64::MAX` milliseconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Whole milliseconds.
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// As a `std::time::Duration`, for handing to timers.
    pub fn to_std(&self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl From<Duration> for DurationMs {
    /// Truncates sub-millisecond precision and saturates on overflow.
    fn from(d: Duration) -> Self {
        Self(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for DurationMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
