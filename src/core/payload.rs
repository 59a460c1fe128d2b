//! Typed payload decoding.
//!
//! The payload is loosely-typed JSON with two required string fields
//! and an open set of issuer-defined extras. The extras are kept
//! verbatim (values and insertion order) so a decoded payload can be
//! re-serialized to the exact text it came from.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::KeysplitError;

/// A decoded token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Expiry timestamp, kept as the original string for round-trip
    /// fidelity. Parse it with [`Payload::expiry`].
    pub expires_at: String,
    /// Identifier of the machine the token is bound to.
    pub machine_id: String,
    /// Every field beyond the required two, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Payload {
    /// Parse `expires_at` as an ISO-8601 date-time in UTC.
    ///
    /// Accepts the three shapes issuers have been seen to produce:
    /// RFC 3339 with an offset, a timezone-less date-time with
    /// optional fractional seconds (read as UTC), and a bare date
    /// (midnight UTC).
    ///
    /// # Errors
    ///
    /// Returns [`KeysplitError::InvalidTimestamp`] when none of the
    /// accepted shapes parse.
    pub fn expiry(&self) -> Result<DateTime<Utc>, KeysplitError> {
        parse_expiry(&self.expires_at)
    }
}

/// Decode payload text into a [`Payload`].
///
/// # Errors
///
/// Returns [`KeysplitError::MalformedPayload`] when the text is not
/// valid JSON, not an object, or `expires_at`/`machine_id` are absent
/// or not strings; [`KeysplitError::InvalidTimestamp`] when
/// `expires_at` is present but not an ISO-8601 date-time.
pub fn decode_payload(text: &str) -> Result<Payload, KeysplitError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| KeysplitError::MalformedPayload {
            reason: e.to_string(),
        })?;

    let object = value
        .as_object()
        .ok_or_else(|| KeysplitError::MalformedPayload {
            reason: "payload is not a JSON object".to_string(),
        })?;

    let expires_at = required_string(object, "expires_at")?;
    let machine_id = required_string(object, "machine_id")?;

    let extra: Map<String, Value> = object
        .iter()
        .filter(|(key, _)| key.as_str() != "expires_at" && key.as_str() != "machine_id")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let payload = Payload {
        expires_at,
        machine_id,
        extra,
    };
    // Reject unparseable expiry at decode time rather than on first use.
    payload.expiry()?;
    Ok(payload)
}

fn required_string(object: &Map<String, Value>, field: &str) -> Result<String, KeysplitError> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(KeysplitError::MalformedPayload {
            reason: format!("field '{field}' is not a string"),
        }),
        None => Err(KeysplitError::MalformedPayload {
            reason: format!("missing required field '{field}'"),
        }),
    }
}

fn parse_expiry(value: &str) -> Result<DateTime<Utc>, KeysplitError> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Ok(with_offset.with_timezone(&Utc));
    }
    if let Ok(naive) = value.parse::<NaiveDateTime>() {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = value.parse::<NaiveDate>() {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    Err(KeysplitError::InvalidTimestamp {
        value: value.to_string(),
    })
}
