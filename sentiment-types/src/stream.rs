//! Duplex byte streams between two peers.

use crate::error::TransportError;
use crate::id::{PeerId, ProtocolId};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Readable half of a stream.
pub type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;

/// Writable half of a stream.
pub type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Abort flag shared by both ends of one stream.
///
/// A transport creates one signal per stream and hands a clone to each end,
/// so an abort on either side is visible to the other even when the bytes
/// it already received look like a clean end-of-stream.
#[derive(Debug, Clone, Default)]
pub struct StreamSignal {
    aborted: Arc<AtomicBool>,
}

impl StreamSignal {
    /// A fresh, un-aborted signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the stream aborted.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
    }

    /// Whether either end aborted the stream.
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }
}

/// One end of a duplex stream opened for a single protocol.
///
/// The write side can be half-closed independently with
/// [`close_write`](PeerStream::close_write); the remote then reads
/// end-of-stream while it can still write back. [`close`](PeerStream::close)
/// releases both halves; [`abort`](PeerStream::abort) does the same and
/// also marks the stream aborted for the remote.
pub struct PeerStream {
    remote: PeerId,
    protocol: ProtocolId,
    reader: Option<BoxedReader>,
    writer: Option<BoxedWriter>,
    signal: StreamSignal,
}

impl PeerStream {
    /// Assemble a stream from its halves.
    pub fn new(
        remote: PeerId,
        protocol: ProtocolId,
        reader: BoxedReader,
        writer: BoxedWriter,
        signal: StreamSignal,
    ) -> Self {
        Self {
            remote,
            protocol,
            reader: Some(reader),
            writer: Some(writer),
            signal,
        }
    }

    /// The peer on the other end.
    pub fn remote_peer(&self) -> &PeerId {
        &self.remote
    }

    /// The protocol the stream was opened for.
    pub fn protocol(&self) -> &ProtocolId {
        &self.protocol
    }

    /// Whether either end aborted the stream.
    pub fn is_aborted(&self) -> bool {
        self.signal.is_aborted()
    }

    /// Whether both halves have been released.
    pub fn is_closed(&self) -> bool {
        self.reader.is_none() && self.writer.is_none()
    }

    /// Read until the remote half-closes, accepting at most `limit` bytes.
    pub async fn read_to_end(&mut self, limit: usize) -> Result<Vec<u8>, TransportError> {
        if self.signal.is_aborted() {
            return Err(TransportError::Aborted);
        }
        let reader = self.reader.as_mut().ok_or(TransportError::Closed("read"))?;
        let mut buf = Vec::new();
        let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
        reader.take(cap).read_to_end(&mut buf).await?;
        // An abort drops the remote's halves, which reads as a clean EOF.
        if self.signal.is_aborted() {
            return Err(TransportError::Aborted);
        }
        if buf.len() > limit {
            return Err(TransportError::PayloadTooLarge { limit });
        }
        Ok(buf)
    }

    /// Write the whole buffer.
    pub async fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        if self.signal.is_aborted() {
            return Err(TransportError::Aborted);
        }
        let writer = self.writer.as_mut().ok_or(TransportError::Closed("write"))?;
        writer.write_all(bytes).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Half-close the write side. Calling it again is a no-op.
    pub async fn close_write(&mut self) -> Result<(), TransportError> {
        match self.writer.take() {
            Some(mut writer) => {
                writer.shutdown().await?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Release both halves. Never fails; a pending half-close is attempted
    /// on a best-effort basis.
    pub async fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.shutdown().await;
        }
        self.reader = None;
    }

    /// Abort the stream: mark it aborted for both ends and drop both halves
    /// without a graceful shutdown.
    pub fn abort(&mut self) {
        self.signal.abort();
        self.writer = None;
        self.reader = None;
    }
}

impl fmt::Debug for PeerStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeerStream")
            .field("remote", &self.remote)
            .field("protocol", &self.protocol)
            .field("readable", &self.reader.is_some())
            .field("writable", &self.writer.is_some())
            .field("aborted", &self.signal.is_aborted())
            .finish()
    }
}
