//! hooverd held-key management.
//!
//! Provides JWK wallet loading, owner/address derivation, RSA-PSS
//! transaction signing behind the `Signer` trait, and the symmetric payload
//! encryption applied to raw requests carrying `x-encrypt-with`.

pub mod encryption;
pub mod error;
pub mod keys;

pub use encryption::{decrypt_payload, encrypt_payload};
pub use error::WalletError;
pub use keys::{address_from_owner, verify_signature, Jwk, Signer, Wallet};
