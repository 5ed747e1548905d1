//! hooverd gateway RPC client library.
//!
//! Provides an async HTTP client for the ledger gateway endpoints hooverd
//! depends on: network info, transaction anchors, storage prices, wallet
//! balances, and transaction submission.
//!
//! # Example
//!
//! ```ignore
//! use hooverd_rpc::GatewayRpc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let gateway = GatewayRpc::new("https://arweave.net:443").unwrap();
//!     let info = gateway.get_info().await.unwrap();
//!     println!("Height: {}", info.height);
//! }
//! ```

pub mod client;
pub mod error;
pub mod gateway;

pub use client::{PostOutcome, RpcClient, RpcConfig};
pub use error::RpcError;
pub use gateway::{GatewayRpc, NetworkInfo};

/// Build a gateway base URL from its parts, e.g. `https://arweave.net:443`.
pub fn gateway_url(protocol: &str, host: &str, port: u16) -> String {
    format!("{}://{}:{}", protocol, host, port)
}
