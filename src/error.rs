//! Domain error types for keysplit.
//!
//! All business-logic errors are defined here using `thiserror`.
//! None of them is fatal: each carries enough context for the caller
//! to decide the next action (retry with a different payload guess,
//! supply the exact original literal, or surface to an operator).

use thiserror::Error;

use crate::core::resolver::PayloadCandidate;

/// Errors that can occur while splitting or validating a token.
#[derive(Debug, Error)]
pub enum KeysplitError {
    /// The token contains a character outside the base64url alphabet.
    #[error("invalid character '{character}' at byte {position}: tokens are restricted to [A-Za-z0-9_-]")]
    InvalidTokenCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character within the token.
        position: usize,
    },

    /// Failed to decode a base64url-encoded segment.
    #[error("failed to decode {segment}: invalid base64url encoding")]
    Base64DecodeError {
        /// Which segment failed to decode (e.g., "signature").
        segment: String,
    },

    /// No canonical serialization of the payload guess prefixes the token.
    ///
    /// Carries the full attempt trace — the only diagnostic signal
    /// available when the search fails. Callers must not discard it.
    #[error("no serialization variant prefixes the token ({} variants attempted)", attempts.len())]
    BoundaryNotFound {
        /// Every candidate that was tried, in priority order.
        attempts: Vec<PayloadCandidate>,
    },

    /// The recovered payload text is not a usable JSON payload.
    #[error("malformed payload: {reason}")]
    MalformedPayload {
        /// Description of what was wrong with the payload.
        reason: String,
    },

    /// The payload's `expires_at` field is not an ISO-8601 date-time.
    #[error("invalid timestamp '{value}': expected an ISO-8601 date-time")]
    InvalidTimestamp {
        /// The unparseable `expires_at` value.
        value: String,
    },
}
