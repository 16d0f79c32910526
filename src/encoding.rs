use crate::SignError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hex::FromHexError;

/// Decodes a hexadecimal key or salt into raw bytes.
///
/// Each pair of digits yields one byte, high nibble first. Upper and lower
/// case `a-f` are both accepted.
///
/// # Errors
/// Returns `SignError::InvalidArgument` when the input has odd length or
/// contains a non-hex character. No partial output is produced.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, SignError> {
    hex::decode(input).map_err(|e| match e {
        FromHexError::OddLength => {
            SignError::InvalidArgument(format!("hex string has odd length {}", input.len()))
        }
        FromHexError::InvalidHexCharacter { c, index } => SignError::InvalidArgument(format!(
            "invalid hex character {:?} at position {}",
            c, index
        )),
        other => SignError::InvalidArgument(other.to_string()),
    })
}

/// Lowercase hex, the inverse of [`decode_hex`].
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// URL-safe base64 (`-` and `_`) without `=` padding.
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes URL-safe base64, tolerating trailing `=` padding.
pub fn decode_base64url(input: &str) -> Result<Vec<u8>, SignError> {
    URL_SAFE_NO_PAD
        .decode(input.trim_end_matches('='))
        .map_err(|e| SignError::InvalidArgument(format!("invalid base64url: {}", e)))
}
