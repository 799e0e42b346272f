#![deny(missing_docs)]
//! In-process implementation of the [`PeerTransport`] trait.
//!
//! A [`MemoryNetwork`] is a shared switchboard; each
//! [`MemoryTransport`] is one peer attached to it. Dialing a peer creates a
//! `tokio::io::duplex` pipe, hands one end to the dialer and spawns the
//! remote's registered [`StreamHandler`] on the other. Half-close, close
//! and abort behave as on a real stream, which makes this transport the
//! default for tests and single-process deployments.

use async_trait::async_trait;
use sentiment_types::error::TransportError;
use sentiment_types::id::{PeerId, ProtocolId};
use sentiment_types::stream::{PeerStream, StreamSignal};
use sentiment_types::transport::{PeerTransport, StreamHandler};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Default pipe capacity in bytes for each direction of a stream.
pub const DEFAULT_BUFFER: usize = 64 * 1024;

type Routes = RwLock<HashMap<ProtocolId, Arc<dyn StreamHandler>>>;

/// Shared switchboard connecting in-memory peers.
///
/// Cloning is cheap; clones refer to the same network.
#[derive(Clone, Default)]
pub struct MemoryNetwork {
    peers: Arc<RwLock<HashMap<PeerId, Arc<Routes>>>>,
}

impl MemoryNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a peer and return its transport. Re-attaching an id replaces
    /// the earlier peer's routes.
    pub async fn join(&self, peer: impl Into<PeerId>) -> MemoryTransport {
        let local = peer.into();
        let routes: Arc<Routes> = Arc::new(RwLock::new(HashMap::new()));
        self.peers
            .write()
            .await
            .insert(local.clone(), Arc::clone(&routes));
        tracing::debug!(peer = %local, "sentiment.transport.join");
        MemoryTransport {
            local,
            routes,
            network: self.clone(),
            buffer: DEFAULT_BUFFER,
        }
    }

    /// Detach a peer. Later dials to it fail with `UnknownPeer`; streams
    /// already open are unaffected.
    pub async fn leave(&self, peer: &PeerId) {
        self.peers.write().await.remove(peer);
        tracing::debug!(peer = %peer, "sentiment.transport.leave");
    }

    async fn routes_of(&self, peer: &PeerId) -> Option<Arc<Routes>> {
        self.peers.read().await.get(peer).cloned()
    }
}

/// One peer attached to a [`MemoryNetwork`].
pub struct MemoryTransport {
    local: PeerId,
    routes: Arc<Routes>,
    network: MemoryNetwork,
    buffer: usize,
}

impl MemoryTransport {
    /// Set the pipe capacity for streams this peer dials.
    pub fn with_buffer(mut self, bytes: usize) -> Self {
        self.buffer = bytes.max(1);
        self
    }
}

#[async_trait]
impl PeerTransport for MemoryTransport {
    fn local_peer_id(&self) -> PeerId {
        self.local.clone()
    }

    async fn handle(
        &self,
        protocol: &ProtocolId,
        handler: Arc<dyn StreamHandler>,
    ) -> Result<(), TransportError> {
        let mut routes = self.routes.write().await;
        if routes.contains_key(protocol) {
            return Err(TransportError::AlreadyHandled(protocol.clone()));
        }
        routes.insert(protocol.clone(), handler);
        tracing::debug!(peer = %self.local, protocol = %protocol, "sentiment.transport.handle");
        Ok(())
    }

    async fn unhandle(&self, protocol: &ProtocolId) -> Result<(), TransportError> {
        self.routes.write().await.remove(protocol);
        tracing::debug!(peer = %self.local, protocol = %protocol, "sentiment.transport.unhandle");
        Ok(())
    }

    async fn dial_protocol(
        &self,
        peer: &PeerId,
        protocol: &ProtocolId,
    ) -> Result<PeerStream, TransportError> {
        let routes = self
            .network
            .routes_of(peer)
            .await
            .ok_or_else(|| TransportError::UnknownPeer(peer.clone()))?;
        let handler = routes.read().await.get(protocol).cloned().ok_or_else(|| {
            TransportError::ProtocolNotSupported {
                peer: peer.clone(),
                protocol: protocol.clone(),
            }
        })?;

        let (near, far) = tokio::io::duplex(self.buffer);
        let (near_read, near_write) = tokio::io::split(near);
        let (far_read, far_write) = tokio::io::split(far);
        let signal = StreamSignal::new();

        let outbound = PeerStream::new(
            peer.clone(),
            protocol.clone(),
            Box::new(near_read),
            Box::new(near_write),
            signal.clone(),
        );
        let inbound = PeerStream::new(
            self.local.clone(),
            protocol.clone(),
            Box::new(far_read),
            Box::new(far_write),
            signal,
        );

        tracing::debug!(
            from = %self.local,
            to = %peer,
            protocol = %protocol,
            "sentiment.transport.dial"
        );
        tokio::spawn(async move {
            handler.handle_stream(inbound).await;
        });
        Ok(outbound)
    }
}
