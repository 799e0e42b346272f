//! Two in-process peers: one keeps a ledger and serves shares, the other
//! asks for them.
//!
//! Run with: cargo run -p sentiment --example peer_query --features full

use sentiment::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let network = MemoryNetwork::new();
    let server_peer = network.join("server").await;
    let client_peer = network.join("client").await;

    let ledger = Arc::new(AllocationLedger::new(Arc::new(MemoryStore::new())));
    let being = BeingId::new("alice");
    let priority = SentimentType::new("priority");
    ledger
        .upsert(&being, &SubjectId::new("rust"), &priority, 3, Some(10))
        .await?;
    ledger
        .upsert(&being, &SubjectId::new("docs"), &priority, 7, Some(10))
        .await?;

    let server = SentimentServer::new(Arc::new(SentimentProvider::new(Arc::clone(&ledger))));
    server.register(&server_peer).await?;

    let client = SentimentClient::new(Arc::new(client_peer));
    for record_id in ["alice:priority:rust", "alice:priority:docs", "alice:priority:tests"] {
        match client.query(&server_peer.local_peer_id(), record_id).await? {
            Some(fraction) => println!("{record_id}: {fraction} ({:.2})", fraction.to_f64()),
            None => println!("{record_id}: no allocation"),
        }
    }

    server.unregister(&server_peer).await?;
    Ok(())
}
