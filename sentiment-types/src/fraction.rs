//! Fraction math: the only shape in which a share leaves the process.
//!
//! Raw weights never cross the wire. A subject's share of its being's
//! per-type total is reduced to lowest terms and policy-constrained so the
//! numerator is always strictly below the denominator. A subject holding
//! the entire budget is therefore reported as `n/(n+1)`, never `1/1`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A reduced share with `numerator < denominator` and `denominator >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    /// Numerator.
    pub numerator: u64,
    /// Denominator, at least 1.
    pub denominator: u64,
}

/// Why a numerator/denominator pair is not an acceptable [`Fraction`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FractionError {
    /// The denominator was zero.
    #[error("denominator must be at least 1")]
    ZeroDenominator,

    /// The fraction was whole or larger.
    #[error("numerator {numerator} must be less than denominator {denominator}")]
    NotProper {
        /// Offending numerator.
        numerator: u64,
        /// Offending denominator.
        denominator: u64,
    },
}

impl Fraction {
    /// The zero share, `0/1`.
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// Validate a pair received from elsewhere. Does not reduce.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, FractionError> {
        if denominator == 0 {
            return Err(FractionError::ZeroDenominator);
        }
        if numerator >= denominator {
            return Err(FractionError::NotProper {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Approximate value as a float.
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Euclidean greatest common divisor. Returns 1 instead of 0 so callers can
/// always divide by the result.
pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    if a == 0 { 1 } else { a }
}

/// Reduce `weight / total` to a proper fraction in lowest terms.
///
/// - a zero weight or zero total yields `0/1`;
/// - when `weight >= total` the denominator is forced to `weight + 1`
///   before reducing, so the result is never whole;
/// - otherwise the pair is divided by its [`gcd`].
///
/// ```
/// use sentiment_types::fraction::normalize;
///
/// assert_eq!(normalize(2, 4).to_string(), "1/2");
/// assert_eq!(normalize(5, 5).to_string(), "5/6");
/// assert_eq!(normalize(0, 10).to_string(), "0/1");
/// ```
pub fn normalize(weight: u64, total: u64) -> Fraction {
    if weight == 0 || total == 0 {
        return Fraction::ZERO;
    }
    let numerator = weight;
    let denominator = if numerator >= total {
        // u64::MAX cannot take the +1, so step the numerator down instead.
        match numerator.checked_add(1) {
            Some(d) => d,
            None => {
                return Fraction {
                    numerator: u64::MAX - 1,
                    denominator: u64::MAX,
                };
            }
        }
    } else {
        total
    };
    let divisor = gcd(numerator, denominator);
    Fraction {
        numerator: numerator / divisor,
        denominator: denominator / divisor,
    }
}
