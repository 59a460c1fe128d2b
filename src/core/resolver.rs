//! Boundary resolution between an encoded payload and its signature.
//!
//! A license token is one undelimited base64url string: the encoded
//! JSON payload immediately followed by encoded signature bytes. There
//! is no separator to split on, so the resolver re-renders a caller's
//! payload guess under each canonical serialization policy, encodes it,
//! and checks whether the result is a byte-exact prefix of the token.
//! The first policy that matches fixes the boundary; everything after
//! the prefix is the signature.

use serde_json::Value;

use crate::core::base64url;
use crate::core::serializer::SerializationVariant;
use crate::error::KeysplitError;

/// A validated token string over the base64url alphabet.
///
/// Construction is the only validation point; the inner string is
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken(String);

impl RawToken {
    /// Validate and wrap a token string.
    ///
    /// The empty string is a legal (if useless) token.
    ///
    /// # Errors
    ///
    /// Returns [`KeysplitError::InvalidTokenCharacter`] for the first
    /// character outside `[A-Za-z0-9_-]`.
    pub fn new(token: impl Into<String>) -> Result<Self, KeysplitError> {
        let token = token.into();
        for (position, character) in token.char_indices() {
            if !character.is_ascii_alphanumeric() && character != '-' && character != '_' {
                return Err(KeysplitError::InvalidTokenCharacter {
                    character,
                    position,
                });
            }
        }
        Ok(RawToken(token))
    }

    /// The token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One serialization attempt from a resolution run.
///
/// On a failed search the full list of these is the only diagnostic
/// signal available, so they record everything needed to reproduce
/// the attempt by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadCandidate {
    /// The policy that produced this candidate.
    pub variant: SerializationVariant,
    /// The rendered payload text.
    pub serialized: String,
    /// Base64url encoding of the rendered text.
    pub encoded: String,
    /// Whether the encoding prefixed the token.
    pub matched: bool,
}

/// A successfully recovered payload/signature boundary.
///
/// Invariant: `payload_encoded` is an exact prefix of the token,
/// `signature_encoded` is everything after it, and `signature_bytes`
/// is the decoding of `signature_encoded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBoundary {
    /// The exact payload text that was encoded into the token.
    pub payload_text: String,
    /// Base64url encoding of `payload_text`.
    pub payload_encoded: String,
    /// The token remainder after the payload prefix. May be empty.
    pub signature_encoded: String,
    /// Decoded signature bytes. Empty when the payload is the whole token.
    pub signature_bytes: Vec<u8>,
}

impl ResolvedBoundary {
    /// Signature length in bytes.
    pub fn signature_len(&self) -> usize {
        self.signature_bytes.len()
    }
}

/// Outcome of a resolution run.
///
/// `NotFound` is an unresolved search, not a failure: the caller can
/// retry with a different guess or supply the exact original literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A serialization variant's encoding prefixed the token.
    Found(ResolvedBoundary),
    /// No variant matched. Carries every attempt made, in priority order.
    NotFound {
        /// All candidates tried, each with `matched == false`.
        attempts: Vec<PayloadCandidate>,
    },
}

/// Find which canonical serialization of `payload` produced the
/// token's prefix, and split the token there.
///
/// Variants are tried in [`SerializationVariant::PRIORITY`] order and
/// the first prefix match wins. A `raw_override` literal takes top
/// priority: when it matches, no other policy is consulted; when it
/// does not, the computed policies are still tried so the attempt
/// trace covers every option. A candidate longer than the token simply
/// fails its prefix test and the search continues.
///
/// # Errors
///
/// Returns [`KeysplitError::Base64DecodeError`] only when a matching
/// prefix leaves a signature remainder that is not decodable base64url
/// (an unpaddable length, for instance).
pub fn resolve(
    token: &RawToken,
    payload: &Value,
    raw_override: Option<&str>,
) -> Result<Resolution, KeysplitError> {
    let mut attempts = Vec::new();

    for variant in SerializationVariant::PRIORITY {
        let Some(serialized) = variant.render(payload, raw_override) else {
            continue;
        };
        let encoded = base64url::encode(serialized.as_bytes());
        let matched = token.as_str().starts_with(&encoded);

        if matched {
            let signature_encoded = token.as_str()[encoded.len()..].to_string();
            let signature_bytes = if signature_encoded.is_empty() {
                Vec::new()
            } else {
                base64url::decode(&signature_encoded, "signature")?
            };
            return Ok(Resolution::Found(ResolvedBoundary {
                payload_text: serialized,
                payload_encoded: encoded,
                signature_encoded,
                signature_bytes,
            }));
        }

        attempts.push(PayloadCandidate {
            variant,
            serialized,
            encoded,
            matched,
        });
    }

    Ok(Resolution::NotFound { attempts })
}
