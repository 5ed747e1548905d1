//! Gateway RPC client.
//!
//! Typed async methods for the gateway endpoints used to complete and
//! dispatch transactions: network info, anchors, prices, balances, and
//! transaction submission.

use crate::client::{PostOutcome, RpcClient, RpcConfig};
use crate::error::RpcError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Response Types
// =============================================================================

/// Gateway `/info` response.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkInfo {
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub release: u64,
    pub height: u64,
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub blocks: u64,
    #[serde(default)]
    pub peers: u64,
    #[serde(default)]
    pub queue_length: u64,
    #[serde(default)]
    pub node_state_latency: u64,
    /// Catch-all for additional fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// =============================================================================
// GatewayRpc
// =============================================================================

/// Async RPC client for a ledger gateway.
pub struct GatewayRpc {
    client: RpcClient,
}

impl GatewayRpc {
    /// Create a gateway client connected to the given URL.
    pub fn new(url: &str) -> Result<Self, RpcError> {
        Ok(Self {
            client: RpcClient::new(url)?,
        })
    }

    /// Create with full configuration.
    pub fn with_config(config: RpcConfig) -> Result<Self, RpcError> {
        Ok(Self {
            client: RpcClient::with_config(config)?,
        })
    }

    // =========================================================================
    // Network Information
    // =========================================================================

    /// Get network info (height, current block, peers, etc.).
    pub async fn get_info(&self) -> Result<NetworkInfo, RpcError> {
        self.client.get_json("/info").await
    }

    /// Get a fresh transaction anchor.
    pub async fn tx_anchor(&self) -> Result<String, RpcError> {
        let endpoint = "/tx_anchor";
        let anchor = self.client.get_text(endpoint).await?;
        let anchor = anchor.trim();
        if anchor.is_empty() {
            return Err(RpcError::InvalidResponse {
                endpoint: endpoint.to_string(),
                reason: "empty anchor".to_string(),
            });
        }
        Ok(anchor.to_string())
    }

    // =========================================================================
    // Pricing and Balances
    // =========================================================================

    /// Get the reward (in winston) required to store `data_size` bytes.
    pub async fn price(&self, data_size: u64) -> Result<u128, RpcError> {
        let endpoint = format!("/price/{}", data_size);
        let body = self.client.get_text(&endpoint).await?;
        parse_winston(&endpoint, &body)
    }

    /// Get a wallet's balance in winston.
    pub async fn wallet_balance(&self, address: &str) -> Result<u128, RpcError> {
        let endpoint = format!("/wallet/{}/balance", address);
        let body = self.client.get_text(&endpoint).await?;
        parse_winston(&endpoint, &body)
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Submit a signed transaction. The gateway's status is returned as-is,
    /// including rejections.
    pub async fn post_transaction<T: Serialize + ?Sized>(
        &self,
        tx: &T,
    ) -> Result<PostOutcome, RpcError> {
        self.client.post_json("/tx", tx).await
    }
}

fn parse_winston(endpoint: &str, body: &str) -> Result<u128, RpcError> {
    body.trim()
        .parse::<u128>()
        .map_err(|e| RpcError::InvalidResponse {
            endpoint: endpoint.to_string(),
            reason: format!("expected winston amount, got {:?}: {}", body, e),
        })
}
