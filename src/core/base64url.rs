//! URL-safe base64 encoding and decoding with padding normalization.
//!
//! Tokens in the wild arrive both with and without trailing `=` padding,
//! so decoding strips any padding before handing the string to the
//! no-pad engine. Encoding never emits padding.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::KeysplitError;

/// Encode bytes as unpadded URL-safe base64.
///
/// The output contains only characters from `[A-Za-z0-9_-]`.
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a URL-safe base64 string, tolerating `=` padding.
///
/// `segment` names the piece of the token being decoded and is carried
/// into the error for diagnostics.
///
/// # Errors
///
/// Returns [`KeysplitError::Base64DecodeError`] on characters outside
/// the base64url alphabet or on an unpaddable length (4k + 1).
pub fn decode(encoded: &str, segment: &str) -> Result<Vec<u8>, KeysplitError> {
    let unpadded = encoded.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(unpadded)
        .map_err(|_| KeysplitError::Base64DecodeError {
            segment: segment.to_string(),
        })
}
