//! Base64url codec.
//!
//! The gateway's JSON wire format carries every binary field (owner, anchor,
//! tags, data, signature, id) as unpadded base64url.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("invalid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Encode bytes as unpadded base64url.
pub fn b64url_encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded base64url. Trailing `=` padding is tolerated.
pub fn b64url_decode(s: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(URL_SAFE_NO_PAD.decode(s.trim_end_matches('='))?)
}
