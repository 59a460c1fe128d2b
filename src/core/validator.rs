//! Expiry evaluation against an injected clock.
//!
//! `now` is always an explicit parameter rather than a system-clock
//! read, so evaluation is deterministic and testable at any instant.

use chrono::{DateTime, Utc};

use crate::core::payload::Payload;
use crate::error::KeysplitError;

/// The result of evaluating a payload's expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The token has not expired. Carries the expiry instant.
    Valid {
        /// When the token stops being valid.
        until: DateTime<Utc>,
    },
    /// The supplied clock is past the expiry instant.
    Expired,
}

/// Evaluate a payload's `expires_at` against the supplied clock.
///
/// The comparison is strict: a token expiring exactly at `now` is
/// still [`ValidationOutcome::Valid`].
///
/// # Errors
///
/// Returns [`KeysplitError::InvalidTimestamp`] when the payload's
/// `expires_at` does not parse.
pub fn evaluate(payload: &Payload, now: DateTime<Utc>) -> Result<ValidationOutcome, KeysplitError> {
    let until = payload.expiry()?;
    if now > until {
        Ok(ValidationOutcome::Expired)
    } else {
        Ok(ValidationOutcome::Valid { until })
    }
}
