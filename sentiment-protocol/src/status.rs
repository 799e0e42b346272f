//! Default status reporter.

use sentiment_types::status::{ProtocolStatus, StatusReporter};

/// Reports registration changes as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStatusReporter;

impl StatusReporter for TracingStatusReporter {
    fn registered(&self, status: &ProtocolStatus) {
        tracing::info!(
            protocol = %status.protocol,
            peer = %status.peer_id,
            "sentiment.server.registered"
        );
    }

    fn unregistered(&self, status: &ProtocolStatus) {
        tracing::info!(
            protocol = %status.protocol,
            peer = %status.peer_id,
            "sentiment.server.unregistered"
        );
    }
}
