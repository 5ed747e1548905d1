//! Wallet error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("failed to read wallet file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("wallet file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid JWK: {0}")]
    InvalidJwk(String),

    #[error("invalid RSA key: {0}")]
    Key(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("signature verification failed")]
    BadSignature,

    #[error("encryption error: {0}")]
    Encryption(String),

    #[error("decryption failed (wrong key or corrupted data)")]
    DecryptionFailed,
}
