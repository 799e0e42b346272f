//! Acceptance tests for the protocol trait crate.
//!
//! Tests cover:
//! - Trait object safety (Arc<dyn Trait> is Send + Sync)
//! - Typed ID conversions and transparent serialization
//! - Error messages callers show to users
//! - Fraction policy at the whole-share boundary

use sentiment_types::*;
use serde_json::json;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Object Safety: Arc<dyn Trait> compiles and is Send + Sync
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn _assert_send_sync<T: Send + Sync>() {}

#[test]
fn arc_record_store_is_send_sync() {
    _assert_send_sync::<std::sync::Arc<dyn RecordStore>>();
}

#[test]
fn arc_peer_transport_is_send_sync() {
    _assert_send_sync::<std::sync::Arc<dyn PeerTransport>>();
}

#[test]
fn arc_stream_handler_is_send_sync() {
    _assert_send_sync::<std::sync::Arc<dyn StreamHandler>>();
}

#[test]
fn arc_fraction_source_is_send_sync() {
    _assert_send_sync::<std::sync::Arc<dyn FractionSource>>();
}

#[test]
fn arc_status_reporter_is_send_sync() {
    _assert_send_sync::<std::sync::Arc<dyn StatusReporter>>();
}

#[test]
fn peer_stream_is_send() {
    fn _assert_send<T: Send>() {}
    _assert_send::<PeerStream>();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Typed IDs
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn typed_ids_convert_and_display() {
    let being = BeingId::from("b1");
    let subject: SubjectId = String::from("s1").into();
    assert_eq!(being.as_str(), "b1");
    assert_eq!(subject.to_string(), "s1");
    assert_eq!(SentimentType::new("priority").as_str(), "priority");
}

#[test]
fn typed_ids_serialize_as_plain_strings() {
    let peer = PeerId::new("12D3KooW");
    assert_eq!(serde_json::to_value(&peer).unwrap(), json!("12D3KooW"));
    let back: ProtocolId = serde_json::from_value(json!("/root-solar/sentiment/1.0.0")).unwrap();
    assert_eq!(back.as_str(), "/root-solar/sentiment/1.0.0");
}

#[test]
fn protocol_status_serializes_camel_case() {
    let status = ProtocolStatus::new("/p/1".into(), "peer-a".into());
    assert_eq!(
        serde_json::to_value(&status).unwrap(),
        json!({"protocol": "/p/1", "peerId": "peer-a"})
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn allocation_exceeded_states_rule_and_totals() {
    let err = LedgerError::AllocationExceeded {
        being: "b1".into(),
        sentiment_type: "priority".into(),
        attempted_total: 11,
        max_weight: 10,
    };
    let msg = err.to_string();
    assert!(msg.contains("b1/priority"), "{msg}");
    assert!(msg.contains("11"), "{msg}");
    assert!(msg.contains("max weight 10"), "{msg}");
}

#[test]
fn key_errors_become_validation_errors() {
    let err: LedgerError = AllocationKey::new("".into(), "t".into(), "s".into())
        .unwrap_err()
        .into();
    assert!(matches!(err, LedgerError::Validation(_)));
}

#[test]
fn provider_error_wraps_ledger_error_transparently() {
    let err = ProviderError::from(LedgerError::UnknownBeing("b9".into()));
    assert_eq!(err.to_string(), "unknown being: b9");
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Fractions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn whole_share_is_never_one_over_one() {
    let f = fraction::normalize(5, 5);
    assert_eq!(f, Fraction::new(5, 6).unwrap());
    assert_ne!((f.numerator, f.denominator), (1, 1));
}

#[test]
fn fraction_wire_shape() {
    let f = fraction::normalize(3, 10);
    assert_eq!(
        serde_json::to_value(f).unwrap(),
        json!({"numerator": 3, "denominator": 10})
    );
}

#[test]
fn duration_ms_round_trips_as_integer() {
    let d: DurationMs = serde_json::from_value(json!(250)).unwrap();
    assert_eq!(d.to_std(), std::time::Duration::from_millis(250));
    assert_eq!(d.to_string(), "250ms");
}
