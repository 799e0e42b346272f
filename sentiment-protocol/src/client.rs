//! Querying a peer for a record's share.

use crate::config::ProtocolConfig;
use crate::error::{ProtocolError, QueryError};
use crate::wire::{self, QueryRequest, QueryResponse};
use sentiment_types::error::TransportError;
use sentiment_types::fraction::Fraction;
use sentiment_types::id::PeerId;
use sentiment_types::stream::PeerStream;
use sentiment_types::transport::PeerTransport;
use std::sync::Arc;

/// Dials peers and asks them for shares.
///
/// Each query opens its own stream; queries on one client may run
/// concurrently.
pub struct SentimentClient {
    transport: Arc<dyn PeerTransport>,
    config: ProtocolConfig,
}

impl SentimentClient {
    /// Query through `transport` with the default configuration.
    pub fn new(transport: Arc<dyn PeerTransport>) -> Self {
        Self {
            transport,
            config: ProtocolConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ProtocolConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Ask `peer` for the share of `record_id`.
    ///
    /// Returns `Ok(None)` when the peer has no such record. A response that
    /// is malformed, carries an improper fraction or answers a different
    /// record aborts the stream and fails with [`QueryError::Protocol`].
    pub async fn query(
        &self,
        peer: &PeerId,
        record_id: &str,
    ) -> Result<Option<Fraction>, QueryError> {
        if record_id.is_empty() {
            return Err(QueryError::Validation(
                "record id must not be empty".to_string(),
            ));
        }

        let mut stream = self
            .transport
            .dial_protocol(peer, &self.config.protocol_id)
            .await
            .map_err(QueryError::Dial)?;

        let result = match self.config.timeout {
            Some(limit) => {
                let bounded =
                    tokio::time::timeout(limit.to_std(), self.exchange(&mut stream, record_id))
                        .await;
                match bounded {
                    Ok(result) => result,
                    Err(_) => {
                        stream.abort();
                        Err(QueryError::Timeout(limit))
                    }
                }
            }
            None => self.exchange(&mut stream, record_id).await,
        };

        if let Err(QueryError::Protocol(e)) = &result {
            tracing::warn!(
                peer = %peer,
                record_id,
                error = %e,
                "sentiment.client.protocol_violation"
            );
            stream.abort();
        }
        stream.close().await;

        match &result {
            Ok(answer) => tracing::debug!(
                peer = %peer,
                record_id,
                found = answer.is_some(),
                "sentiment.client.query"
            ),
            Err(e) => tracing::debug!(
                peer = %peer,
                record_id,
                error = %e,
                "sentiment.client.query_failed"
            ),
        }
        result
    }

    async fn exchange(
        &self,
        stream: &mut PeerStream,
        record_id: &str,
    ) -> Result<Option<Fraction>, QueryError> {
        let request = wire::encode_request(&QueryRequest::new(record_id))?;
        stream
            .write_all(&request)
            .await
            .map_err(QueryError::Transport)?;
        stream.close_write().await.map_err(QueryError::Transport)?;

        let bytes = match stream.read_to_end(self.config.max_payload_bytes).await {
            Ok(bytes) => bytes,
            Err(TransportError::PayloadTooLarge { limit }) => {
                return Err(ProtocolError::PayloadTooLarge { limit }.into());
            }
            Err(e) => return Err(QueryError::Transport(e)),
        };
        interpret(wire::decode_response(&bytes)?, record_id)
    }
}

fn interpret(response: QueryResponse, expected: &str) -> Result<Option<Fraction>, QueryError> {
    let echoed = match &response {
        QueryResponse::Ok { record_id, .. } | QueryResponse::NotFound { record_id } => {
            Some(record_id.as_str())
        }
        QueryResponse::Error { record_id, .. } => record_id.as_deref(),
    };
    if let Some(actual) = echoed {
        if actual != expected {
            return Err(ProtocolError::RecordIdMismatch {
                expected: expected.to_string(),
                actual: actual.to_string(),
            }
            .into());
        }
    }

    match response {
        QueryResponse::Ok { fraction, .. } => {
            let fraction = Fraction::new(fraction.numerator, fraction.denominator)
                .map_err(ProtocolError::from)?;
            Ok(Some(fraction))
        }
        QueryResponse::NotFound { .. } => Ok(None),
        QueryResponse::Error { message, .. } => Err(QueryError::Remote(message)),
    }
}
