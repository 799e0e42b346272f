//! Serving share queries to peers.

use crate::config::ProtocolConfig;
use crate::exchange::{self, ExchangeState};
use crate::status::TracingStatusReporter;
use async_trait::async_trait;
use sentiment_types::error::TransportError;
use sentiment_types::source::FractionSource;
use sentiment_types::status::{ProtocolStatus, StatusReporter};
use sentiment_types::stream::PeerStream;
use sentiment_types::transport::{PeerTransport, StreamHandler};
use std::sync::Arc;

/// Answers inbound share queries from a [`FractionSource`].
///
/// Each inbound stream carries exactly one request and gets exactly one
/// response. Failures while handling a request become `error` responses;
/// the registration itself is never affected by a bad request.
pub struct SentimentServer {
    handler: Arc<QueryHandler>,
    reporter: Arc<dyn StatusReporter>,
}

struct QueryHandler {
    source: Arc<dyn FractionSource>,
    config: ProtocolConfig,
}

#[async_trait]
impl StreamHandler for QueryHandler {
    async fn handle_stream(&self, stream: PeerStream) {
        exchange::run(self.source.as_ref(), self.config.max_payload_bytes, stream).await;
    }
}

impl SentimentServer {
    /// Serve `source` with the default configuration, reporting
    /// registrations through `tracing`.
    pub fn new(source: Arc<dyn FractionSource>) -> Self {
        Self {
            handler: Arc::new(QueryHandler {
                source,
                config: ProtocolConfig::default(),
            }),
            reporter: Arc::new(TracingStatusReporter),
        }
    }

    /// Replace the configuration.
    pub fn with_config(self, config: ProtocolConfig) -> Self {
        Self {
            handler: Arc::new(QueryHandler {
                source: Arc::clone(&self.handler.source),
                config,
            }),
            reporter: self.reporter,
        }
    }

    /// Replace the status reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn StatusReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ProtocolConfig {
        &self.handler.config
    }

    /// Install the handler on `transport` and report the registration.
    pub async fn register(&self, transport: &dyn PeerTransport) -> Result<(), TransportError> {
        let protocol = &self.handler.config.protocol_id;
        let handler: Arc<dyn StreamHandler> = self.handler.clone();
        transport.handle(protocol, handler).await?;
        self.reporter.registered(&ProtocolStatus::new(
            protocol.clone(),
            transport.local_peer_id(),
        ));
        Ok(())
    }

    /// Remove the handler from `transport` and report it.
    pub async fn unregister(&self, transport: &dyn PeerTransport) -> Result<(), TransportError> {
        let protocol = &self.handler.config.protocol_id;
        transport.unhandle(protocol).await?;
        self.reporter.unregistered(&ProtocolStatus::new(
            protocol.clone(),
            transport.local_peer_id(),
        ));
        Ok(())
    }

    /// Serve one stream directly, bypassing transport routing. Returns the
    /// state the exchange finished in.
    pub async fn serve(&self, stream: PeerStream) -> ExchangeState {
        exchange::run(
            self.handler.source.as_ref(),
            self.handler.config.max_payload_bytes,
            stream,
        )
        .await
    }
}
