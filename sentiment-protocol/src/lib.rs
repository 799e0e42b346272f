#![deny(missing_docs)]
//! Peer-to-peer protocol for asking another peer what share of a being's
//! budget went to a subject.
//!
//! [`SentimentServer`] registers on a [`PeerTransport`](sentiment_types::PeerTransport)
//! and answers from any [`FractionSource`](sentiment_types::FractionSource);
//! [`SentimentClient`] dials a peer and validates what comes back. Only the
//! reduced [`Fraction`](sentiment_types::Fraction) crosses the wire, never
//! raw weights.
//!
//! Each stream carries one JSON request and one JSON response, each ended
//! by the sender half-closing. See [`wire`] for the message layout.

mod client;
mod config;
mod error;
mod exchange;
mod server;
mod status;
pub mod wire;

pub use client::SentimentClient;
pub use config::{DEFAULT_MAX_PAYLOAD_BYTES, DEFAULT_PROTOCOL_ID, ProtocolConfig};
pub use error::{ProtocolError, QueryError};
pub use exchange::ExchangeState;
pub use server::SentimentServer;
pub use status::TracingStatusReporter;
pub use wire::{QueryRequest, QueryResponse};
