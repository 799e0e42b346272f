//! Protocol configuration.

use sentiment_types::duration::DurationMs;
use sentiment_types::id::ProtocolId;
use serde::{Deserialize, Serialize};

/// Protocol identifier both sides agree on unless configured otherwise.
pub const DEFAULT_PROTOCOL_ID: &str = "/root-solar/sentiment/1.0.0";

/// Largest request or response body accepted by default, in bytes.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 64 * 1024;

/// Settings shared by [`SentimentServer`](crate::SentimentServer) and
/// [`SentimentClient`](crate::SentimentClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Identifier the server registers under and the client dials.
    pub protocol_id: ProtocolId,
    /// Bound on a single payload read from the stream.
    pub max_payload_bytes: usize,
    /// Client-side bound on one exchange, measured after the dial. `None`
    /// waits indefinitely.
    pub timeout: Option<DurationMs>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            protocol_id: ProtocolId::from(DEFAULT_PROTOCOL_ID),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            timeout: None,
        }
    }
}

impl ProtocolConfig {
    /// Use a different protocol identifier.
    pub fn with_protocol_id(mut self, protocol_id: impl Into<ProtocolId>) -> Self {
        self.protocol_id = protocol_id.into();
        self
    }

    /// Set the payload bound.
    pub fn with_max_payload_bytes(mut self, bytes: usize) -> Self {
        self.max_payload_bytes = bytes;
        self
    }

    /// Bound each client exchange.
    pub fn with_timeout(mut self, timeout: DurationMs) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
