//! Transaction types.
//!
//! A transaction moves through three types, each produced only by the step
//! before it:
//!
//! - `UnsignedTransaction`: data, owner, reward, and tags. Tags may still be added.
//! - `AnchoredTransaction`: the draft plus its anchor (`last_tx`).
//! - `SignedTransaction`: signature and id computed; read-only.

use crate::TxError;
use hooverd_types::constants::TX_FORMAT;
use hooverd_types::{b64url_decode, b64url_encode};
use serde::{Deserialize, Serialize};

// =============================================================================
// Tags
// =============================================================================

/// A name/value metadata pair. Order within a transaction is significant
/// and names may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Transaction Body
// =============================================================================

/// Fields fixed once the draft is built.
#[derive(Debug, Clone)]
pub(crate) struct TxBody {
    pub(crate) owner: Vec<u8>,
    pub(crate) target: Vec<u8>,
    pub(crate) quantity: u128,
    pub(crate) reward: u128,
    pub(crate) data: Vec<u8>,
    pub(crate) data_root: Vec<u8>,
    pub(crate) tags: Vec<Tag>,
}

impl TxBody {
    pub(crate) fn data_size(&self) -> u64 {
        self.data.len() as u64
    }
}

// =============================================================================
// UnsignedTransaction
// =============================================================================

/// A draft transaction: built, not yet anchored or signed.
#[derive(Debug, Clone)]
pub struct UnsignedTransaction {
    pub(crate) body: TxBody,
}

impl UnsignedTransaction {
    /// Append a tag. Tags keep insertion order.
    pub fn add_tag(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.body.tags.push(Tag::new(name, value));
    }

    pub fn tags(&self) -> &[Tag] {
        &self.body.tags
    }

    pub fn data(&self) -> &[u8] {
        &self.body.data
    }

    pub fn owner(&self) -> &[u8] {
        &self.body.owner
    }

    pub fn reward(&self) -> u128 {
        self.body.reward
    }

    pub fn data_root(&self) -> &[u8] {
        &self.body.data_root
    }

    /// Attach a freshly fetched anchor. The anchor must be base64url.
    pub fn anchor(self, anchor: impl Into<String>) -> Result<AnchoredTransaction, TxError> {
        let last_tx = anchor.into();
        if last_tx.is_empty() {
            return Err(TxError::InvalidAnchor("anchor is empty".into()));
        }
        let last_tx_bytes =
            b64url_decode(&last_tx).map_err(|e| TxError::InvalidAnchor(e.to_string()))?;

        Ok(AnchoredTransaction {
            body: self.body,
            last_tx,
            last_tx_bytes,
        })
    }
}

// =============================================================================
// AnchoredTransaction
// =============================================================================

/// A draft with its anchor set, ready for signing.
#[derive(Debug, Clone)]
pub struct AnchoredTransaction {
    pub(crate) body: TxBody,
    pub(crate) last_tx: String,
    pub(crate) last_tx_bytes: Vec<u8>,
}

impl AnchoredTransaction {
    pub fn last_tx(&self) -> &str {
        &self.last_tx
    }

    pub fn tags(&self) -> &[Tag] {
        &self.body.tags
    }

    pub fn data(&self) -> &[u8] {
        &self.body.data
    }
}

// =============================================================================
// SignedTransaction
// =============================================================================

/// A signed transaction. Nothing about it can change.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub(crate) body: TxBody,
    pub(crate) last_tx: String,
    pub(crate) signature: Vec<u8>,
    pub(crate) id: String,
}

impl SignedTransaction {
    /// Transaction id: base64url(SHA-256(signature)).
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub fn last_tx(&self) -> &str {
        &self.last_tx
    }

    pub fn owner(&self) -> &[u8] {
        &self.body.owner
    }

    pub fn tags(&self) -> &[Tag] {
        &self.body.tags
    }

    pub fn data(&self) -> &[u8] {
        &self.body.data
    }

    pub fn reward(&self) -> u128 {
        self.body.reward
    }

    /// Wire form posted to the gateway.
    pub fn to_json(&self) -> TransactionJson {
        TransactionJson {
            format: TX_FORMAT,
            id: self.id.clone(),
            last_tx: self.last_tx.clone(),
            owner: b64url_encode(&self.body.owner),
            tags: self
                .body
                .tags
                .iter()
                .map(|t| TagJson {
                    name: b64url_encode(t.name.as_bytes()),
                    value: b64url_encode(t.value.as_bytes()),
                })
                .collect(),
            target: b64url_encode(&self.body.target),
            quantity: self.body.quantity.to_string(),
            data: b64url_encode(&self.body.data),
            data_size: self.body.data_size().to_string(),
            data_root: b64url_encode(&self.body.data_root),
            reward: self.body.reward.to_string(),
            signature: b64url_encode(&self.signature),
        }
    }
}

// =============================================================================
// Wire Format
// =============================================================================

/// Tag as carried on the wire: base64url name and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagJson {
    pub name: String,
    pub value: String,
}

/// JSON body accepted by the gateway's `POST /tx`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionJson {
    pub format: u8,
    pub id: String,
    pub last_tx: String,
    pub owner: String,
    pub tags: Vec<TagJson>,
    pub target: String,
    pub quantity: String,
    pub data: String,
    pub data_size: String,
    pub data_root: String,
    pub reward: String,
    pub signature: String,
}
