//! Shared test fixtures and helper utilities.
//!
//! Provides known payload renderings and a token builder that mirrors
//! the issuer: payload text and signature bytes, each base64url
//! encoded, concatenated with no delimiter.
#![allow(dead_code)]

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{json, Value};

/// The payload text observed in a real token: sorted keys, one space
/// after every `:` and every `,`.
pub const OBSERVED_PAYLOAD: &str =
    r#"{"expires_at": "2026-09-02T14:05:46.327291", "machine_id": "53447161649937"}"#;

/// Expiry used by the observed payload.
pub const OBSERVED_EXPIRES_AT: &str = "2026-09-02T14:05:46.327291";

/// Machine identifier used by the observed payload.
pub const OBSERVED_MACHINE_ID: &str = "53447161649937";

/// The structured guess matching the observed payload.
pub fn observed_guess() -> Value {
    json!({
        "expires_at": OBSERVED_EXPIRES_AT,
        "machine_id": OBSERVED_MACHINE_ID,
    })
}

/// Build a token the way the issuer does: encoded payload text
/// directly followed by the encoded signature, no delimiter.
pub fn build_token(payload_text: &str, signature: &[u8]) -> String {
    format!(
        "{}{}",
        URL_SAFE_NO_PAD.encode(payload_text.as_bytes()),
        URL_SAFE_NO_PAD.encode(signature)
    )
}
