//! Wallet key management.
//!
//! Loads the held RSA key from a JWK wallet file, derives the owner
//! (public modulus) and address, and signs transaction payloads with
//! RSA-PSS over SHA-256.

use crate::error::WalletError;
use hooverd_types::{b64url_decode, b64url_encode};
use rsa::pss::{BlindedSigningKey, Signature, VerifyingKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Public exponent used by every ledger key.
const PUBLIC_EXPONENT: u32 = 65537;

// =============================================================================
// JWK
// =============================================================================

/// RSA private key in JSON Web Key form, as stored in wallet files.
///
/// Only the components needed to rebuild the key are required; CRT
/// parameters are recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub n: String,
    pub e: String,
    pub d: Option<String>,
    pub p: Option<String>,
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
}

fn jwk_uint(name: &str, value: Option<&String>) -> Result<BigUint, WalletError> {
    let value = value.ok_or_else(|| WalletError::InvalidJwk(format!("missing `{}`", name)))?;
    let bytes = b64url_decode(value)
        .map_err(|e| WalletError::InvalidJwk(format!("`{}`: {}", name, e)))?;
    if bytes.is_empty() {
        return Err(WalletError::InvalidJwk(format!("`{}` is empty", name)));
    }
    Ok(BigUint::from_bytes_be(&bytes))
}

// =============================================================================
// Signer
// =============================================================================

/// The held signing identity.
///
/// Implementations are read-only after construction and shared across all
/// in-flight requests.
pub trait Signer: Send + Sync {
    /// Raw public modulus, carried in the transaction's `owner` field.
    fn owner(&self) -> &[u8];

    /// Sign a transaction's signature payload.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, WalletError>;

    /// Wallet address derived from the owner.
    fn address(&self) -> String {
        address_from_owner(self.owner())
    }
}

/// Derive a wallet address: base64url(SHA-256(owner)).
pub fn address_from_owner(owner: &[u8]) -> String {
    b64url_encode(&Sha256::digest(owner))
}

/// Verify an RSA-PSS/SHA-256 signature made by the key whose modulus is `owner`.
pub fn verify_signature(owner: &[u8], message: &[u8], signature: &[u8]) -> Result<(), WalletError> {
    let public = RsaPublicKey::new(
        BigUint::from_bytes_be(owner),
        BigUint::from(PUBLIC_EXPONENT),
    )
    .map_err(|e| WalletError::Key(e.to_string()))?;
    let signature = Signature::try_from(signature).map_err(|_| WalletError::BadSignature)?;
    VerifyingKey::<Sha256>::new(public)
        .verify(message, &signature)
        .map_err(|_| WalletError::BadSignature)
}

// =============================================================================
// Wallet
// =============================================================================

/// A loaded RSA wallet.
pub struct Wallet {
    signing_key: BlindedSigningKey<Sha256>,
    owner: Vec<u8>,
}

impl Wallet {
    /// Build a wallet from an RSA private key.
    pub fn from_private_key(key: RsaPrivateKey) -> Self {
        let owner = key.n().to_bytes_be();
        Self {
            signing_key: BlindedSigningKey::<Sha256>::new(key),
            owner,
        }
    }

    /// Build a wallet from a parsed JWK.
    pub fn from_jwk(jwk: &Jwk) -> Result<Self, WalletError> {
        if jwk.kty != "RSA" {
            return Err(WalletError::InvalidJwk(format!(
                "unsupported key type: {}",
                jwk.kty
            )));
        }

        let n = jwk_uint("n", Some(&jwk.n))?;
        let e = jwk_uint("e", Some(&jwk.e))?;
        let d = jwk_uint("d", jwk.d.as_ref())?;
        let p = jwk_uint("p", jwk.p.as_ref())?;
        let q = jwk_uint("q", jwk.q.as_ref())?;

        let key = RsaPrivateKey::from_components(n, e, d, vec![p, q])
            .map_err(|e| WalletError::Key(e.to_string()))?;
        key.validate().map_err(|e| WalletError::Key(e.to_string()))?;

        Ok(Self::from_private_key(key))
    }

    /// Parse a wallet from JWK JSON text.
    pub fn from_json(json: &str) -> Result<Self, WalletError> {
        let jwk: Jwk = serde_json::from_str(json)?;
        Self::from_jwk(&jwk)
    }

    /// Load a wallet from a JWK file on disk.
    pub fn load(path: &Path) -> Result<Self, WalletError> {
        let json = std::fs::read_to_string(path).map_err(|source| WalletError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let wallet = Self::from_json(&json)?;
        log::debug!("loaded wallet {} from {}", wallet.address(), path.display());
        Ok(wallet)
    }

    /// Generate a fresh wallet with a `bits`-bit modulus.
    pub fn generate(bits: usize) -> Result<Self, WalletError> {
        let key = RsaPrivateKey::new(&mut rand::thread_rng(), bits)
            .map_err(|e| WalletError::Key(e.to_string()))?;
        Ok(Self::from_private_key(key))
    }
}

impl Signer for Wallet {
    fn owner(&self) -> &[u8] {
        &self.owner
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, WalletError> {
        let signature = self
            .signing_key
            .try_sign_with_rng(&mut rand::thread_rng(), message)
            .map_err(|e| WalletError::Signing(e.to_string()))?;
        Ok(signature.to_vec())
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
