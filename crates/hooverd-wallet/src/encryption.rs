//! Symmetric payload encryption.
//!
//! Implements the ledger client library's symmetric scheme so that data
//! encrypted here can be decrypted by any client holding the same key:
//! PBKDF2-HMAC-SHA256 key derivation followed by AES-256-CBC with PKCS#7
//! padding. The output is `iv (16 bytes) || ciphertext`.

use crate::error::WalletError;
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use sha2::Sha256;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Salt used when the caller supplies none (fixed by the client library).
const DEFAULT_SALT: &[u8] = b"salt";

/// PBKDF2 iteration count.
const PBKDF2_ROUNDS: u32 = 100_000;

const KEY_SIZE: usize = 32;
const IV_SIZE: usize = 16;
const BLOCK_SIZE: usize = 16;

fn derive_key(key: &[u8]) -> [u8; KEY_SIZE] {
    let mut derived = [0u8; KEY_SIZE];
    pbkdf2::pbkdf2_hmac::<Sha256>(key, DEFAULT_SALT, PBKDF2_ROUNDS, &mut derived);
    derived
}

/// Encrypt `data` with a caller-supplied key.
pub fn encrypt_payload(data: &[u8], key: &[u8]) -> Result<Vec<u8>, WalletError> {
    if key.is_empty() {
        return Err(WalletError::Encryption("encryption key is empty".into()));
    }

    let derived = derive_key(key);
    let mut iv = [0u8; IV_SIZE];
    rand::thread_rng().fill_bytes(&mut iv);

    let ciphertext =
        Aes256CbcEnc::new(&derived.into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(data);

    let mut output = Vec::with_capacity(IV_SIZE + ciphertext.len());
    output.extend_from_slice(&iv);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data produced by [`encrypt_payload`].
pub fn decrypt_payload(encrypted: &[u8], key: &[u8]) -> Result<Vec<u8>, WalletError> {
    if encrypted.len() < IV_SIZE + BLOCK_SIZE || (encrypted.len() - IV_SIZE) % BLOCK_SIZE != 0 {
        return Err(WalletError::DecryptionFailed);
    }

    let derived = derive_key(key);
    let mut iv = [0u8; IV_SIZE];
    iv.copy_from_slice(&encrypted[..IV_SIZE]);

    Aes256CbcDec::new(&derived.into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&encrypted[IV_SIZE..])
        .map_err(|_| WalletError::DecryptionFailed)
}
