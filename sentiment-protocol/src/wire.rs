//! JSON wire messages.
//!
//! One request and one response per stream, each delimited by the sender
//! half-closing its write side:
//!
//! ```text
//! request   {"recordId": "<being>:<type>:<subject>"}
//! response  {"status": "ok", "recordId": "...", "fraction": {"numerator": 3, "denominator": 10}}
//!           {"status": "not_found", "recordId": "..."}
//!           {"status": "error", "message": "...", "recordId": "..."}   // recordId optional
//! ```
//!
//! Unknown fields are ignored in both directions.

use crate::error::ProtocolError;
use sentiment_types::fraction::Fraction;
use serde::{Deserialize, Serialize};

/// Request for one record's share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// Record id of the form `<being>:<type>:<subject>`.
    pub record_id: String,
}

impl QueryRequest {
    /// Create a request.
    pub fn new(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
        }
    }
}

/// The three response shapes, discriminated by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryResponse {
    /// The record exists.
    #[serde(rename_all = "camelCase")]
    Ok {
        /// Echo of the requested record id.
        record_id: String,
        /// The record's share.
        fraction: Fraction,
    },
    /// The record does not exist.
    #[serde(rename_all = "camelCase")]
    NotFound {
        /// Echo of the requested record id.
        record_id: String,
    },
    /// The request could not be answered.
    #[serde(rename_all = "camelCase")]
    Error {
        /// Human-readable reason.
        message: String,
        /// Echo of the requested record id, when the request got that far.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        record_id: Option<String>,
    },
}

impl QueryResponse {
    /// Status tag as it appears on the wire.
    pub fn status(&self) -> &'static str {
        match self {
            QueryResponse::Ok { .. } => "ok",
            QueryResponse::NotFound { .. } => "not_found",
            QueryResponse::Error { .. } => "error",
        }
    }
}

/// Decode a request body.
pub fn decode_request(bytes: &[u8]) -> Result<QueryRequest, ProtocolError> {
    serde_json::from_slice(bytes).map_err(|e| ProtocolError::Malformed(e.to_string()))
}

/// Encode a request body.
pub fn encode_request(request: &QueryRequest) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(request).map_err(|e| ProtocolError::Encode(e.to_string()))
}

/// Decode a response body. Only the shape is checked here; the fraction
/// and the echoed record id are validated by the client.
pub fn decode_response(bytes: &[u8]) -> Result<QueryResponse, ProtocolError> {
    serde_json::from_slice(bytes).map_err(|e| ProtocolError::Malformed(e.to_string()))
}

/// Encode a response body.
pub fn encode_response(response: &QueryResponse) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(response).map_err(|e| ProtocolError::Encode(e.to_string()))
}
