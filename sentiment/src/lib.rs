#![deny(missing_docs)]
//! # sentiment: umbrella crate
//!
//! One import surface for the sentiment ledger: protocol traits, the
//! allocation ledger, the peer query protocol, and the store and transport
//! backends, each behind a feature flag. The [`prelude`] covers the common
//! path of wiring a ledger to a server and querying it from a client.

#[cfg(feature = "ledger")]
pub use sentiment_ledger as ledger;
#[cfg(feature = "protocol")]
pub use sentiment_protocol as protocol;
#[cfg(feature = "store-fs")]
pub use sentiment_store_fs as store_fs;
#[cfg(feature = "store-memory")]
pub use sentiment_store_memory as store_memory;
#[cfg(feature = "transport-memory")]
pub use sentiment_transport_memory as transport_memory;
#[cfg(feature = "core")]
pub use sentiment_types as types;

/// Happy-path imports for composing a sentiment peer.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use sentiment_types::{
        AllocationKey, BeingId, DurationMs, Fraction, FractionSource, LedgerError, PeerId,
        PeerTransport, ProtocolId, RecordStore, SentimentType, StatusReporter, SubjectId,
    };

    #[cfg(feature = "ledger")]
    pub use sentiment_ledger::{
        AllocationLedger, LedgerConfig, SentimentAllocation, SentimentProvider,
    };

    #[cfg(feature = "protocol")]
    pub use sentiment_protocol::{ProtocolConfig, QueryError, SentimentClient, SentimentServer};

    #[cfg(feature = "store-memory")]
    pub use sentiment_store_memory::MemoryStore;

    #[cfg(feature = "store-fs")]
    pub use sentiment_store_fs::FsStore;

    #[cfg(feature = "transport-memory")]
    pub use sentiment_transport_memory::{MemoryNetwork, MemoryTransport};
}
