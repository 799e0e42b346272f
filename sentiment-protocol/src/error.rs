//! Protocol and query errors.

use sentiment_types::duration::DurationMs;
use sentiment_types::error::TransportError;
use sentiment_types::fraction::FractionError;
use thiserror::Error;

/// A payload that is malformed or semantically invalid.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The bytes did not decode into the expected message shape.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// An "ok" response carried a fraction outside `0 <= n < d, d >= 1`.
    #[error("invalid fraction in response: {0}")]
    InvalidFraction(#[from] FractionError),

    /// The response answered a different record than the one asked for.
    #[error("response is for record {actual:?}, expected {expected:?}")]
    RecordIdMismatch {
        /// Record id that was requested.
        expected: String,
        /// Record id echoed back.
        actual: String,
    },

    /// The payload exceeded the configured bound.
    #[error("payload exceeds {limit} bytes")]
    PayloadTooLarge {
        /// Configured bound.
        limit: usize,
    },

    /// A message could not be encoded.
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Why [`SentimentClient::query`](crate::SentimentClient::query) failed.
///
/// A missing record is not an error; it is `Ok(None)`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum QueryError {
    /// The arguments were rejected before dialing.
    #[error("validation error: {0}")]
    Validation(String),

    /// The peer could not be reached on the protocol.
    #[error("dial failed: {0}")]
    Dial(#[source] TransportError),

    /// The stream failed after it was opened.
    #[error("stream failed: {0}")]
    Transport(#[source] TransportError),

    /// The peer answered with something other than a valid response.
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolError),

    /// The peer reported an application error.
    #[error("remote error: {0}")]
    Remote(String),

    /// The exchange did not finish within the configured timeout.
    #[error("query timed out after {0}")]
    Timeout(DurationMs),
}

impl QueryError {
    /// The peer understood the request and explicitly reported a failure.
    pub fn is_remote(&self) -> bool {
        matches!(self, QueryError::Remote(_))
    }

    /// The peer was unreachable or the exchange broke down: dial, stream,
    /// protocol and timeout failures.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            QueryError::Dial(_)
                | QueryError::Transport(_)
                | QueryError::Protocol(_)
                | QueryError::Timeout(_)
        )
    }
}
