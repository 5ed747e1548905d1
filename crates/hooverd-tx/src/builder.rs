//! Transaction builder.
//!
//! Wraps a data payload into an `UnsignedTransaction` draft owned by the
//! held key. The builder never anchors or signs; tags are added to the
//! returned draft in request order.

use crate::merkle;
use crate::types::{TxBody, UnsignedTransaction};
use crate::TxError;

/// Builder for transaction drafts.
pub struct TransactionBuilder {
    data: Vec<u8>,
    owner: Option<Vec<u8>>,
    reward: u128,
}

impl TransactionBuilder {
    /// Start a draft carrying `data`.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            owner: None,
            reward: 0,
        }
    }

    /// Set the owner (public modulus of the signing key).
    pub fn owner(mut self, owner: impl Into<Vec<u8>>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the reward (winston) paid for storing the data.
    pub fn reward(mut self, reward: u128) -> Self {
        self.reward = reward;
        self
    }

    /// Build the draft.
    ///
    /// Computes the data root over the chunked payload. Fails if no owner
    /// was set.
    pub fn build(self) -> Result<UnsignedTransaction, TxError> {
        let owner = match self.owner {
            Some(owner) if !owner.is_empty() => owner,
            _ => return Err(TxError::MissingOwner),
        };

        let data_root = merkle::data_root(&self.data);

        Ok(UnsignedTransaction {
            body: TxBody {
                owner,
                target: Vec::new(),
                quantity: 0,
                reward: self.reward,
                data: self.data,
                data_root,
                tags: Vec::new(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_draft() {
        let tx = TransactionBuilder::new(b"hello".to_vec())
            .owner(vec![1u8; 512])
            .reward(65595508)
            .build()
            .unwrap();

        assert_eq!(tx.data(), b"hello");
        assert_eq!(tx.owner().len(), 512);
        assert_eq!(tx.reward(), 65595508);
        assert_eq!(tx.data_root().len(), 32);
        assert!(tx.tags().is_empty());
    }

    #[test]
    fn test_empty_data_has_empty_root() {
        let tx = TransactionBuilder::new(Vec::new())
            .owner(vec![1u8; 512])
            .build()
            .unwrap();
        assert!(tx.data_root().is_empty());
    }

    #[test]
    fn test_missing_owner() {
        let result = TransactionBuilder::new(b"hello".to_vec()).build();
        assert!(matches!(result, Err(TxError::MissingOwner)));

        let result = TransactionBuilder::new(b"hello".to_vec()).owner(Vec::new()).build();
        assert!(matches!(result, Err(TxError::MissingOwner)));
    }
}
