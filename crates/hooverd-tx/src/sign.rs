//! Transaction signing.
//!
//! Turns an `AnchoredTransaction` into a `SignedTransaction`:
//!   1. Deep-hash the format-2 field list into the signature payload
//!   2. Sign the payload with the held key
//!   3. Derive the id as base64url(SHA-256(signature))

use hooverd_types::b64url_encode;
use hooverd_types::constants::TX_FORMAT;
use hooverd_wallet::Signer;
use sha2::{Digest, Sha256};

use crate::deep_hash::{deep_hash, DeepHashItem, DEEP_HASH_SIZE};
use crate::types::{AnchoredTransaction, SignedTransaction};
use crate::TxError;

/// Compute the signature payload of an anchored transaction.
///
/// ```text
/// ["2", owner, target, quantity, reward, last_tx, [[name, value], ...], data_size, data_root]
/// ```
pub fn signature_data(tx: &AnchoredTransaction) -> [u8; DEEP_HASH_SIZE] {
    let body = &tx.body;
    let format = TX_FORMAT.to_string();
    let quantity = body.quantity.to_string();
    let reward = body.reward.to_string();
    let data_size = body.data_size().to_string();

    let tags = body
        .tags
        .iter()
        .map(|t| {
            DeepHashItem::List(vec![
                DeepHashItem::Blob(t.name.as_bytes()),
                DeepHashItem::Blob(t.value.as_bytes()),
            ])
        })
        .collect();

    deep_hash(&DeepHashItem::List(vec![
        DeepHashItem::Blob(format.as_bytes()),
        DeepHashItem::Blob(&body.owner),
        DeepHashItem::Blob(&body.target),
        DeepHashItem::Blob(quantity.as_bytes()),
        DeepHashItem::Blob(reward.as_bytes()),
        DeepHashItem::Blob(&tx.last_tx_bytes),
        DeepHashItem::List(tags),
        DeepHashItem::Blob(data_size.as_bytes()),
        DeepHashItem::Blob(&body.data_root),
    ]))
}

/// Sign an anchored transaction with the held key.
///
/// The signer must own the transaction: its public modulus has to match the
/// draft's `owner`.
pub fn sign_transaction(
    tx: AnchoredTransaction,
    signer: &dyn Signer,
) -> Result<SignedTransaction, TxError> {
    if signer.owner() != tx.body.owner.as_slice() {
        return Err(TxError::Invalid(
            "signer does not own this transaction".into(),
        ));
    }

    let payload = signature_data(&tx);
    let signature = signer.sign(&payload)?;
    let id = b64url_encode(&Sha256::digest(&signature));

    Ok(SignedTransaction {
        body: tx.body,
        last_tx: tx.last_tx,
        signature,
        id,
    })
}

impl SignedTransaction {
    /// Check the signature against the owner and the id against the signature.
    pub fn verify(&self) -> Result<(), TxError> {
        if b64url_encode(&Sha256::digest(&self.signature)) != self.id {
            return Err(TxError::Invalid("id does not match signature".into()));
        }
        let anchored = AnchoredTransaction {
            body: self.body.clone(),
            last_tx: self.last_tx.clone(),
            last_tx_bytes: hooverd_types::b64url_decode(&self.last_tx)
                .map_err(|e| TxError::InvalidAnchor(e.to_string()))?,
        };
        hooverd_wallet::verify_signature(&self.body.owner, &signature_data(&anchored), &self.signature)?;
        Ok(())
    }
}
