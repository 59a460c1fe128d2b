//! End-to-end tests for boundary resolution and token validation.
//!
//! Covers the observed-token scenario (spaced serialization with a
//! trailing signature), exhaustive search failure, cross-variant
//! payload decoding, and the full resolve → decode → evaluate
//! pipeline.

mod common;

use chrono::{NaiveDate, TimeDelta, Utc};
use keysplit::{
    check_token, decode_payload, resolve, KeysplitError, RawToken, Resolution,
    SerializationVariant, ValidationOutcome,
};
use serde_json::json;

use common::{build_token, observed_guess, OBSERVED_MACHINE_ID, OBSERVED_PAYLOAD};

// --- Observed token: spaced serialization, trailing signature ---

#[test]
fn test_observed_spacing_with_18_byte_signature() {
    let signature: Vec<u8> = (0u8..18).collect();
    let token = RawToken::new(build_token(OBSERVED_PAYLOAD, &signature)).unwrap();

    let Resolution::Found(boundary) = resolve(&token, &observed_guess(), None).unwrap() else {
        panic!("expected the spaced serialization to match");
    };

    assert_eq!(boundary.payload_text, OBSERVED_PAYLOAD);
    assert_eq!(boundary.signature_len(), 18);
    assert_eq!(boundary.signature_bytes, signature);
    assert!(token.as_str().starts_with(&boundary.payload_encoded));
    assert_eq!(
        format!("{}{}", boundary.payload_encoded, boundary.signature_encoded),
        token.as_str()
    );
}

#[test]
fn test_observed_token_wins_with_sorted_spaced_variant() {
    // The spaced rendering must be reachable: every earlier computed
    // policy renders without spaces and fails the prefix test.
    let token = RawToken::new(build_token(OBSERVED_PAYLOAD, &[0xAA; 32])).unwrap();
    let spaced = SerializationVariant::SortedSpaced
        .render(&observed_guess(), None)
        .unwrap();
    assert_eq!(spaced, OBSERVED_PAYLOAD);

    let Resolution::Found(boundary) = resolve(&token, &observed_guess(), None).unwrap() else {
        panic!("expected a resolved boundary");
    };
    assert_eq!(boundary.payload_text, spaced);
}

// --- Exhausted search ---

#[test]
fn test_unmatched_token_records_nine_attempts_with_override() {
    let token = RawToken::new("AAAABBBBCCCCDDDD").unwrap();
    let Resolution::NotFound { attempts } =
        resolve(&token, &observed_guess(), Some(r#"{"guess":"wrong"}"#)).unwrap()
    else {
        panic!("expected no match");
    };
    assert_eq!(attempts.len(), 9);
    assert!(attempts.iter().all(|a| !a.matched));
    assert_eq!(attempts[0].variant, SerializationVariant::RawOverride);
}

#[test]
fn test_unmatched_token_records_all_computed_attempts() {
    let token = RawToken::new("AAAABBBBCCCCDDDD").unwrap();
    let Resolution::NotFound { attempts } = resolve(&token, &observed_guess(), None).unwrap()
    else {
        panic!("expected no match");
    };
    // Without a raw override the eight computed policies are tried.
    assert_eq!(attempts.len(), 8);
    for attempt in &attempts {
        assert!(!attempt.matched);
        assert!(!attempt.serialized.is_empty());
        assert!(!attempt.encoded.is_empty());
    }
}

// --- Zero-length signature ---

#[test]
fn test_token_equal_to_payload_encoding_has_empty_signature() {
    let token = RawToken::new(build_token(OBSERVED_PAYLOAD, &[])).unwrap();
    let Resolution::Found(boundary) = resolve(&token, &observed_guess(), None).unwrap() else {
        panic!("expected a resolved boundary");
    };
    assert_eq!(boundary.signature_encoded, "");
    assert_eq!(boundary.signature_len(), 0);
}

// --- Cross-variant idempotence ---

#[test]
fn test_every_computed_variant_decodes_to_the_same_payload() {
    let guess = observed_guess();
    for variant in &SerializationVariant::PRIORITY[1..] {
        let text = variant.render(&guess, None).unwrap();
        let payload = decode_payload(&text).unwrap();
        assert_eq!(payload.expires_at, "2026-09-02T14:05:46.327291", "{variant}");
        assert_eq!(payload.machine_id, OBSERVED_MACHINE_ID, "{variant}");
        assert!(payload.extra.is_empty(), "{variant}");
    }
}

// --- Full pipeline ---

#[test]
fn test_check_token_valid_before_expiry() {
    let token = RawToken::new(build_token(OBSERVED_PAYLOAD, &[7; 32])).unwrap();
    let now = NaiveDate::from_ymd_opt(2026, 9, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();
    let report = check_token(&token, &observed_guess(), None, now).unwrap();
    assert!(matches!(report.outcome, ValidationOutcome::Valid { .. }));
    assert_eq!(report.payload.machine_id, OBSERVED_MACHINE_ID);
    assert_eq!(report.boundary.signature_len(), 32);
}

#[test]
fn test_check_token_expired_after_expiry() {
    let token = RawToken::new(build_token(OBSERVED_PAYLOAD, &[7; 32])).unwrap();
    let expiry = NaiveDate::from_ymd_opt(2026, 9, 2)
        .unwrap()
        .and_hms_micro_opt(14, 5, 46, 327_291)
        .unwrap()
        .and_utc();
    let report = check_token(&token, &observed_guess(), None, expiry + TimeDelta::microseconds(1))
        .unwrap();
    assert_eq!(report.outcome, ValidationOutcome::Expired);
}

#[test]
fn test_check_token_surfaces_attempt_trace_on_miss() {
    let token = RawToken::new("QQQQRRRRSSSS").unwrap();
    let err = check_token(&token, &observed_guess(), None, Utc::now()).unwrap_err();
    let KeysplitError::BoundaryNotFound { attempts } = err else {
        panic!("expected BoundaryNotFound");
    };
    assert_eq!(attempts.len(), 8);
}

#[test]
fn test_check_token_with_raw_override() {
    // A literal no computed policy would produce: unsorted keys with
    // pretty-ish spacing.
    let raw = "{\"machine_id\": \"53447161649937\",\"expires_at\": \"2026-09-02T14:05:46.327291\"}";
    let token = RawToken::new(build_token(raw, &[1; 16])).unwrap();
    let now = NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();
    let report = check_token(&token, &json!({}), Some(raw), now).unwrap();
    assert_eq!(report.boundary.payload_text, raw);
    assert_eq!(report.boundary.signature_len(), 16);
    assert!(matches!(report.outcome, ValidationOutcome::Valid { .. }));
}

#[test]
fn test_check_token_rejects_malformed_recovered_payload() {
    // The override matches the token prefix but is not a usable payload.
    let raw = r#"{"expires_at": "2026-09-02T14:05:46.327291"}"#;
    let token = RawToken::new(build_token(raw, &[2; 8])).unwrap();
    let err = check_token(&token, &json!({}), Some(raw), Utc::now()).unwrap_err();
    assert!(matches!(
        err,
        KeysplitError::MalformedPayload { reason } if reason.contains("machine_id")
    ));
}

#[test]
fn test_extra_fields_survive_the_pipeline() {
    let text = r#"{"expires_at":"2026-09-02T14:05:46.327291","machine_id":"53447161649937","plan":"pro","seats":5}"#;
    let token = RawToken::new(build_token(text, &[3; 20])).unwrap();
    let guess = json!({
        "expires_at": "2026-09-02T14:05:46.327291",
        "machine_id": "53447161649937",
        "plan": "pro",
        "seats": 5,
    });
    let now = NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();
    let report = check_token(&token, &guess, None, now).unwrap();
    assert_eq!(report.payload.extra["plan"], json!("pro"));
    assert_eq!(report.payload.extra["seats"], json!(5));
}
