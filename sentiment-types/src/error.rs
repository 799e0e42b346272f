//! Error types for each protocol boundary.

use crate::id::{BeingId, PeerId, ProtocolId, SentimentType};
use crate::key::KeyError;
use thiserror::Error;

/// Record store errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// A read or scan failed.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// A write or delete failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Serialization or deserialization of a record value failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Allocation ledger errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LedgerError {
    /// An argument failed validation (negative weight, empty identifier, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// The write would push the (being, type) total past its ceiling.
    /// Stored state is untouched when this is returned.
    #[error(
        "allocation exceeded for {being}/{sentiment_type}: total weight {attempted_total} \
         would exceed max weight {max_weight}"
    )]
    AllocationExceeded {
        /// Being whose budget was exceeded.
        being: BeingId,
        /// Sentiment type the budget is scoped to.
        sentiment_type: SentimentType,
        /// Total the write would have produced.
        attempted_total: u64,
        /// Ceiling supplied with the write.
        max_weight: u64,
    },

    /// The being does not exist and auto-provisioning is disabled.
    #[error("unknown being: {0}")]
    UnknownBeing(BeingId),

    /// A stored record could not be interpreted as an allocation.
    #[error("corrupt record {id}: {reason}")]
    CorruptRecord {
        /// Record id in the store.
        id: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The underlying record store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<KeyError> for LedgerError {
    fn from(err: KeyError) -> Self {
        LedgerError::Validation(err.to_string())
    }
}

/// Errors from a [`FractionSource`](crate::source::FractionSource).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The record id is not three non-empty colon-delimited segments.
    #[error("invalid record id: {0}")]
    InvalidRecordId(String),

    /// The ledger failed while answering.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Peer transport and stream errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TransportError {
    /// No route to the requested peer.
    #[error("unknown peer: {0}")]
    UnknownPeer(PeerId),

    /// The peer does not handle the requested protocol.
    #[error("peer {peer} does not support protocol {protocol}")]
    ProtocolNotSupported {
        /// Peer that was dialed.
        peer: PeerId,
        /// Protocol that was requested.
        protocol: ProtocolId,
    },

    /// A handler is already registered for the protocol.
    #[error("protocol already handled: {0}")]
    AlreadyHandled(ProtocolId),

    /// Reading or writing the stream failed.
    #[error("stream i/o failed: {0}")]
    Io(String),

    /// The stream was aborted by either side.
    #[error("stream aborted")]
    Aborted,

    /// The operation needs a half of the stream that was already closed.
    #[error("stream {0} side closed")]
    Closed(&'static str),

    /// The remote sent more bytes than the reader accepts.
    #[error("payload exceeds {limit} bytes")]
    PayloadTooLarge {
        /// Maximum accepted payload size.
        limit: usize,
    },

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io(err.to_string())
    }
}
