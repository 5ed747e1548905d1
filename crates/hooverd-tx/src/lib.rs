//! hooverd transaction construction and signing.
//!
//! Provides the typed transaction lifecycle
//! (`UnsignedTransaction` → `AnchoredTransaction` → `SignedTransaction`),
//! a builder for drafts, the chunked data-root computation, the deep-hash
//! signature payload, and signing against a held `Signer`.

pub mod builder;
pub mod deep_hash;
pub mod merkle;
pub mod sign;
pub mod types;

pub use builder::TransactionBuilder;
pub use sign::{sign_transaction, signature_data};
pub use types::{AnchoredTransaction, SignedTransaction, Tag, TransactionJson, UnsignedTransaction};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("transaction owner not set")]
    MissingOwner,

    #[error("invalid anchor: {0}")]
    InvalidAnchor(String),

    #[error("signing error: {0}")]
    Signing(#[from] hooverd_wallet::WalletError),

    #[error("invalid transaction: {0}")]
    Invalid(String),
}
