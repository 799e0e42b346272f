use async_trait::async_trait;
use sentiment_transport_memory::MemoryNetwork;
use sentiment_types::error::TransportError;
use sentiment_types::id::{PeerId, ProtocolId};
use sentiment_types::stream::PeerStream;
use sentiment_types::transport::{PeerTransport, StreamHandler};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Reads the request, answers with it upper-cased, then closes.
struct Shout;

#[async_trait]
impl StreamHandler for Shout {
    async fn handle_stream(&self, mut stream: PeerStream) {
        if let Ok(bytes) = stream.read_to_end(1024).await {
            let _ = stream.write_all(&bytes.to_ascii_uppercase()).await;
        }
        stream.close().await;
    }
}

/// Reports the remote peer it saw and whether the stream was aborted.
struct Observer {
    seen: mpsc::UnboundedSender<(PeerId, bool)>,
}

#[async_trait]
impl StreamHandler for Observer {
    async fn handle_stream(&self, mut stream: PeerStream) {
        let read = stream.read_to_end(1024).await;
        let aborted = matches!(read, Err(TransportError::Aborted));
        let _ = self.seen.send((stream.remote_peer().clone(), aborted));
        stream.close().await;
    }
}

fn proto() -> ProtocolId {
    ProtocolId::from("/test/shout/1")
}

#[tokio::test]
async fn request_response_round_trip() {
    let net = MemoryNetwork::new();
    let alice = net.join("alice").await;
    let bob = net.join("bob").await;
    bob.handle(&proto(), Arc::new(Shout)).await.unwrap();

    let mut stream = alice.dial_protocol(&"bob".into(), &proto()).await.unwrap();
    assert_eq!(stream.remote_peer().as_str(), "bob");
    assert_eq!(stream.protocol(), &proto());

    stream.write_all(b"hello").await.unwrap();
    stream.close_write().await.unwrap();
    assert_eq!(stream.read_to_end(1024).await.unwrap(), b"HELLO");
    stream.close().await;
}

#[tokio::test]
async fn handler_sees_dialer_as_remote() {
    let net = MemoryNetwork::new();
    let alice = net.join("alice").await;
    let bob = net.join("bob").await;
    let (tx, mut rx) = mpsc::unbounded_channel();
    bob.handle(&proto(), Arc::new(Observer { seen: tx })).await.unwrap();

    let mut stream = alice.dial_protocol(&"bob".into(), &proto()).await.unwrap();
    stream.close_write().await.unwrap();

    let (remote, aborted) = rx.recv().await.unwrap();
    assert_eq!(remote.as_str(), "alice");
    assert!(!aborted);
}

#[tokio::test]
async fn dialer_abort_reaches_handler() {
    let net = MemoryNetwork::new();
    let alice = net.join("alice").await;
    let bob = net.join("bob").await;
    let (tx, mut rx) = mpsc::unbounded_channel();
    bob.handle(&proto(), Arc::new(Observer { seen: tx })).await.unwrap();

    let mut stream = alice.dial_protocol(&"bob".into(), &proto()).await.unwrap();
    stream.abort();

    let (_, aborted) = rx.recv().await.unwrap();
    assert!(aborted);
}

#[tokio::test]
async fn unknown_peer_fails_dial() {
    let net = MemoryNetwork::new();
    let alice = net.join("alice").await;

    let err = alice.dial_protocol(&"ghost".into(), &proto()).await.unwrap_err();
    assert!(matches!(err, TransportError::UnknownPeer(p) if p.as_str() == "ghost"));
}

#[tokio::test]
async fn unhandled_protocol_fails_dial() {
    let net = MemoryNetwork::new();
    let alice = net.join("alice").await;
    let _bob = net.join("bob").await;

    let err = alice.dial_protocol(&"bob".into(), &proto()).await.unwrap_err();
    assert!(matches!(err, TransportError::ProtocolNotSupported { .. }));
}

#[tokio::test]
async fn duplicate_handle_is_rejected() {
    let net = MemoryNetwork::new();
    let bob = net.join("bob").await;
    bob.handle(&proto(), Arc::new(Shout)).await.unwrap();

    let err = bob.handle(&proto(), Arc::new(Shout)).await.unwrap_err();
    assert!(matches!(err, TransportError::AlreadyHandled(p) if p == proto()));
}

#[tokio::test]
async fn unhandle_stops_routing_and_allows_reregistration() {
    let net = MemoryNetwork::new();
    let alice = net.join("alice").await;
    let bob = net.join("bob").await;
    bob.handle(&proto(), Arc::new(Shout)).await.unwrap();
    bob.unhandle(&proto()).await.unwrap();
    // Second unhandle is a no-op.
    bob.unhandle(&proto()).await.unwrap();

    assert!(alice.dial_protocol(&"bob".into(), &proto()).await.is_err());
    bob.handle(&proto(), Arc::new(Shout)).await.unwrap();
    assert!(alice.dial_protocol(&"bob".into(), &proto()).await.is_ok());
}

#[tokio::test]
async fn leave_makes_peer_unreachable() {
    let net = MemoryNetwork::new();
    let alice = net.join("alice").await;
    let bob = net.join("bob").await;
    bob.handle(&proto(), Arc::new(Shout)).await.unwrap();

    net.leave(&bob.local_peer_id()).await;
    let err = alice.dial_protocol(&"bob".into(), &proto()).await.unwrap_err();
    assert!(matches!(err, TransportError::UnknownPeer(_)));
}

#[tokio::test]
async fn small_buffer_still_carries_large_payloads() {
    let net = MemoryNetwork::new();
    let alice = net.join("alice").await.with_buffer(8);
    let bob = net.join("bob").await;
    bob.handle(&proto(), Arc::new(Shout)).await.unwrap();

    let payload = vec![b'a'; 900];
    let mut stream = alice.dial_protocol(&"bob".into(), &proto()).await.unwrap();
    stream.write_all(&payload).await.unwrap();
    stream.close_write().await.unwrap();
    assert_eq!(stream.read_to_end(1024).await.unwrap(), vec![b'A'; 900]);
}

#[test]
fn _assert_send_sync() {
    fn assert<T: Send + Sync>() {}
    assert::<sentiment_transport_memory::MemoryTransport>();
    assert::<MemoryNetwork>();
}
