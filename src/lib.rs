//! keysplit: recover the payload/signature boundary inside
//! undelimited base64url license tokens.
//!
//! A license token is the base64url encoding of a JSON payload
//! immediately followed by signature bytes, with no delimiter between
//! the two. Given the token and a structured guess at the payload's
//! field values, this crate determines deterministically which exact
//! textual serialization of the payload produced the token's prefix,
//! decodes the payload, isolates the signature bytes, and evaluates
//! the expiry against a caller-supplied clock.
//!
//! The crate makes no claim about signature authenticity: verifying
//! the signature cryptographically is the caller's business.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use keysplit::{check_token, RawToken};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), keysplit::KeysplitError> {
//! let guess = json!({
//!     "expires_at": "2026-09-02T14:05:46.327291",
//!     "machine_id": "53447161649937",
//! });
//! // Payload rendered compact, followed by four signature bytes.
//! let token = RawToken::new(format!(
//!     "{}{}",
//!     keysplit::core::base64url::encode(serde_json::to_string(&guess).unwrap().as_bytes()),
//!     keysplit::core::base64url::encode(&[1, 2, 3, 4]),
//! ))?;
//! let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
//! let report = check_token(&token, &guess, None, now)?;
//! assert_eq!(report.boundary.signature_len(), 4);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod core;
pub mod error;

use chrono::{DateTime, Utc};
use serde_json::Value;

pub use crate::core::payload::{decode_payload, Payload};
pub use crate::core::resolver::{
    resolve, PayloadCandidate, RawToken, ResolvedBoundary, Resolution,
};
pub use crate::core::serializer::SerializationVariant;
pub use crate::core::validator::{evaluate, ValidationOutcome};
pub use crate::error::KeysplitError;

/// Everything recovered from one token: the boundary, the decoded
/// payload, and the expiry verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenReport {
    /// The recovered payload/signature split.
    pub boundary: ResolvedBoundary,
    /// The decoded payload.
    pub payload: Payload,
    /// The expiry verdict at the supplied clock value.
    pub outcome: ValidationOutcome,
}

/// Run the whole pipeline: resolve the boundary, decode the payload,
/// evaluate the expiry.
///
/// # Errors
///
/// An unresolved search surfaces as
/// [`KeysplitError::BoundaryNotFound`], carrying the complete attempt
/// trace — it must not be discarded, being the only diagnostic signal
/// a failed search produces. Decoding and expiry errors propagate
/// unchanged.
pub fn check_token(
    token: &RawToken,
    payload_guess: &Value,
    raw_override: Option<&str>,
    now: DateTime<Utc>,
) -> Result<TokenReport, KeysplitError> {
    let boundary = match resolve(token, payload_guess, raw_override)? {
        Resolution::Found(boundary) => boundary,
        Resolution::NotFound { attempts } => {
            return Err(KeysplitError::BoundaryNotFound { attempts });
        }
    };
    let payload = decode_payload(&boundary.payload_text)?;
    let outcome = evaluate(&payload, now)?;
    Ok(TokenReport {
        boundary,
        payload,
        outcome,
    })
}
