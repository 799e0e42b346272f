use sentiment_store_memory::MemoryStore;
use sentiment_types::store::{Filter, RecordKey, RecordStore};
use serde_json::json;
use std::sync::Arc;

fn key(table: &str, id: &str) -> RecordKey {
    RecordKey::new(table, id)
}

// --- Basic CRUD ---

#[tokio::test]
async fn upsert_then_select() {
    let store = MemoryStore::new();

    let written = store
        .upsert(&key("being", "b1"), json!({"name": "alice"}))
        .await
        .unwrap();
    assert_eq!(written.value, json!({"name": "alice"}));

    let record = store.select(&key("being", "b1")).await.unwrap().unwrap();
    assert_eq!(record.key, key("being", "b1"));
    assert_eq!(record.value, json!({"name": "alice"}));
}

#[tokio::test]
async fn select_missing_returns_none() {
    let store = MemoryStore::new();
    assert!(store.select(&key("being", "missing")).await.unwrap().is_none());
}

#[tokio::test]
async fn upsert_replaces_value() {
    let store = MemoryStore::new();

    store.upsert(&key("t", "k"), json!(1)).await.unwrap();
    store.upsert(&key("t", "k"), json!(2)).await.unwrap();

    let record = store.select(&key("t", "k")).await.unwrap().unwrap();
    assert_eq!(record.value, json!(2));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn delete_removes_record() {
    let store = MemoryStore::new();

    store.upsert(&key("t", "k"), json!("v")).await.unwrap();
    store.delete(&key("t", "k")).await.unwrap();

    assert!(store.select(&key("t", "k")).await.unwrap().is_none());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn delete_missing_is_noop() {
    let store = MemoryStore::new();
    store.delete(&key("t", "nonexistent")).await.unwrap();
}

// --- Query ---

#[tokio::test]
async fn query_filters_by_field_equality() {
    let store = MemoryStore::new();

    store
        .upsert(&key("alloc", "b1:priority:s1"), json!({"beingId": "b1", "type": "priority"}))
        .await
        .unwrap();
    store
        .upsert(&key("alloc", "b1:trust:s1"), json!({"beingId": "b1", "type": "trust"}))
        .await
        .unwrap();
    store
        .upsert(&key("alloc", "b2:priority:s1"), json!({"beingId": "b2", "type": "priority"}))
        .await
        .unwrap();

    let rows = store
        .query("alloc", &Filter::all().where_eq("beingId", "b1"))
        .await
        .unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.key.id.as_str()).collect();
    assert_eq!(ids, vec!["b1:priority:s1", "b1:trust:s1"]);

    let rows = store
        .query(
            "alloc",
            &Filter::all().where_eq("beingId", "b1").where_eq("type", "trust"),
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn query_empty_filter_returns_whole_table() {
    let store = MemoryStore::new();

    store.upsert(&key("a", "1"), json!({})).await.unwrap();
    store.upsert(&key("a", "2"), json!({})).await.unwrap();
    store.upsert(&key("b", "1"), json!({})).await.unwrap();

    let rows = store.query("a", &Filter::all()).await.unwrap();
    assert_eq!(rows.len(), 2);
}

// --- Table isolation ---

#[tokio::test]
async fn tables_are_isolated() {
    let store = MemoryStore::new();

    store.upsert(&key("being", "x"), json!("being")).await.unwrap();
    store.upsert(&key("alloc", "x"), json!("alloc")).await.unwrap();

    let being = store.select(&key("being", "x")).await.unwrap().unwrap();
    assert_eq!(being.value, json!("being"));
    store.delete(&key("alloc", "x")).await.unwrap();
    assert!(store.select(&key("being", "x")).await.unwrap().is_some());
}

// --- Concurrency ---

#[tokio::test]
async fn concurrent_writes_do_not_lose_records() {
    let store = Arc::new(MemoryStore::new());
    let mut handles = Vec::new();

    for i in 0..32 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .upsert(&RecordKey::new("t", format!("k{i}")), json!(i))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.query("t", &Filter::all()).await.unwrap().len(), 32);
}

#[tokio::test]
async fn usable_as_trait_object() {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::default());
    store.upsert(&key("t", "k"), json!(true)).await.unwrap();
    assert!(store.select(&key("t", "k")).await.unwrap().is_some());
}
