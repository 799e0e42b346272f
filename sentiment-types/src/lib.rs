//! # sentiment-types: protocol traits for the sentiment allocation ledger
//!
//! This crate defines the boundaries every other crate in the workspace
//! composes against. Nothing here knows how records are stored or how bytes
//! reach a peer; it only names the operations.
//!
//! ## The Protocols
//!
//! | Protocol | Trait | What it does |
//! |----------|-------|-------------|
//! | ① Storage | [`RecordStore`] | Select, upsert, delete and scan keyed JSON records |
//! | ② Transport | [`PeerTransport`], [`StreamHandler`] | Open/accept one duplex stream per protocol id |
//! | ③ Source | [`FractionSource`] | Answer "what share went to this subject" |
//! | ④ Status | [`StatusReporter`] | Observe handler registration |
//!
//! ## Core Types
//!
//! - [`AllocationKey`]: the typed `(being, type, subject)` composite key
//!   with a total parse/format pair.
//! - [`Fraction`] and [`fraction::normalize`]: the only representation of a
//!   share that ever crosses a process boundary. A fraction is never whole.
//! - [`PeerStream`]: a duplex byte stream with independent half-close,
//!   full close and abort.
//!
//! ## Dependency Notes
//!
//! Record values are `serde_json::Value`. Stores are schemaless; the ledger
//! owns the shape of its rows.

#![deny(missing_docs)]

pub mod duration;
pub mod error;
pub mod fraction;
pub mod id;
pub mod key;
pub mod source;
pub mod status;
pub mod store;
pub mod stream;
pub mod transport;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use duration::DurationMs;
pub use error::{LedgerError, ProviderError, StoreError, TransportError};
pub use fraction::{Fraction, FractionError};
pub use id::{BeingId, PeerId, ProtocolId, SentimentType, SubjectId};
pub use key::{AllocationKey, KeyError};
pub use source::FractionSource;
pub use status::{ProtocolStatus, StatusReporter};
pub use store::{Filter, Record, RecordKey, RecordStore};
pub use stream::{BoxedReader, BoxedWriter, PeerStream, StreamSignal};
pub use transport::{PeerTransport, StreamHandler};
