//! The ledger gateway, as the pipeline sees it.

use async_trait::async_trait;
use hooverd_rpc::{GatewayRpc, NetworkInfo, RpcError};
use hooverd_tx::SignedTransaction;

/// Network capabilities the daemon needs from a gateway.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Reward, in winston, for storing `data_size` bytes.
    async fn price(&self, data_size: u64) -> Result<u128, RpcError>;

    /// A fresh anchor for a transaction about to be signed.
    async fn tx_anchor(&self) -> Result<String, RpcError>;

    /// Post a signed transaction; returns the gateway's HTTP status,
    /// whatever it is.
    async fn submit(&self, tx: &SignedTransaction) -> Result<u16, RpcError>;

    async fn network_info(&self) -> Result<NetworkInfo, RpcError>;

    /// Balance of `address`, in winston.
    async fn balance(&self, address: &str) -> Result<u128, RpcError>;
}

#[async_trait]
impl Ledger for GatewayRpc {
    async fn price(&self, data_size: u64) -> Result<u128, RpcError> {
        GatewayRpc::price(self, data_size).await
    }

    async fn tx_anchor(&self) -> Result<String, RpcError> {
        GatewayRpc::tx_anchor(self).await
    }

    async fn submit(&self, tx: &SignedTransaction) -> Result<u16, RpcError> {
        let outcome = self.post_transaction(&tx.to_json()).await?;
        if !outcome.is_success() {
            log::warn!(
                "gateway rejected transaction {} with {}: {}",
                tx.id(),
                outcome.status,
                outcome.body.trim()
            );
        }
        Ok(outcome.status)
    }

    async fn network_info(&self) -> Result<NetworkInfo, RpcError> {
        self.get_info().await
    }

    async fn balance(&self, address: &str) -> Result<u128, RpcError> {
        self.wallet_balance(address).await
    }
}
