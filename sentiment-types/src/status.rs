//! The Status interface: observing protocol registration.

use crate::id::{PeerId, ProtocolId};
use serde::{Deserialize, Serialize};

/// What a [`StatusReporter`] is told on registration changes.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolStatus {
    /// The protocol that was (un)registered.
    pub protocol: ProtocolId,
    /// The local peer serving it.
    pub peer_id: PeerId,
}

impl ProtocolStatus {
    /// Create a new status.
    pub fn new(protocol: ProtocolId, peer_id: PeerId) -> Self {
        Self { protocol, peer_id }
    }
}

/// Protocol ④: Status
///
/// Observes handler registration. Never called on the request path, and
/// never able to influence it: the methods return nothing.
pub trait StatusReporter: Send + Sync {
    /// A handler was registered.
    fn registered(&self, status: &ProtocolStatus);

    /// A handler was unregistered.
    fn unregistered(&self, status: &ProtocolStatus);
}
