//! The Transport protocol: one duplex stream per protocol identifier.

use crate::error::TransportError;
use crate::id::{PeerId, ProtocolId};
use crate::stream::PeerStream;
use async_trait::async_trait;
use std::sync::Arc;

/// Protocol ②: Transport
///
/// A peer-to-peer transport that multiplexes protocols over whatever
/// connection it maintains. Inbound streams for a protocol are routed to the
/// handler registered for it; outbound streams are opened with
/// [`dial_protocol`](PeerTransport::dial_protocol).
///
/// Implementations decide how each inbound stream is scheduled. The
/// in-memory transport spawns one task per stream.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    /// Identity of the local peer.
    fn local_peer_id(&self) -> PeerId;

    /// Route inbound streams for `protocol` to `handler`.
    async fn handle(
        &self,
        protocol: &ProtocolId,
        handler: Arc<dyn StreamHandler>,
    ) -> Result<(), TransportError>;

    /// Stop routing `protocol`. No-op if nothing was registered.
    async fn unhandle(&self, protocol: &ProtocolId) -> Result<(), TransportError>;

    /// Open a stream to `peer` for `protocol`.
    async fn dial_protocol(
        &self,
        peer: &PeerId,
        protocol: &ProtocolId,
    ) -> Result<PeerStream, TransportError>;
}

/// Receives inbound streams for one protocol.
///
/// The handler owns the stream and is responsible for closing it.
#[async_trait]
pub trait StreamHandler: Send + Sync {
    /// Serve one inbound stream to completion.
    async fn handle_stream(&self, stream: PeerStream);
}
