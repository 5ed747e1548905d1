//! Daemon configuration.
//!
//! Flags fall back to `HOOVERD_*` environment variables. The parsed `Cli`
//! becomes an immutable `Config` that the rest of the daemon reads.

use clap::Parser;
use hooverd_types::constants::{
    DEFAULT_GATEWAY_HOST, DEFAULT_GATEWAY_PORT, DEFAULT_LISTEN_PORT, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_TIMEOUT_SECS,
};
use std::path::PathBuf;
use std::time::Duration;

/// Local daemon that signs and dispatches ledger transactions.
#[derive(Parser, Debug, Clone)]
#[command(name = "hooverd")]
#[command(about = "Hoovers up local data and dispatches it to the ledger as signed transactions")]
#[command(version)]
pub struct Cli {
    /// Gateway host transactions are dispatched to.
    #[arg(long, env = "HOOVERD_ARWEAVE_HOST", default_value = DEFAULT_GATEWAY_HOST)]
    pub arweave_host: String,

    /// Gateway port.
    #[arg(long, env = "HOOVERD_ARWEAVE_PORT", default_value_t = DEFAULT_GATEWAY_PORT)]
    pub arweave_port: u16,

    /// Gateway protocol (http or https).
    #[arg(long, env = "HOOVERD_ARWEAVE_PROTOCOL", default_value = "https")]
    pub arweave_protocol: GatewayProtocol,

    /// Local address to listen on.
    #[arg(long, env = "HOOVERD_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Local port to listen on.
    #[arg(long, env = "HOOVERD_PORT", default_value_t = DEFAULT_LISTEN_PORT)]
    pub port: u16,

    /// JWK wallet file holding the signing key.
    #[arg(long, env = "HOOVERD_WALLET_FILE")]
    pub wallet_file: PathBuf,

    /// Timeout for each gateway call, in seconds.
    #[arg(
        long,
        env = "HOOVERD_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Largest request body accepted, in bytes.
    #[arg(long, env = "HOOVERD_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "HOOVERD_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatewayProtocol {
    Http,
    Https,
}

impl std::fmt::Display for GatewayProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Https => write!(f, "https"),
        }
    }
}

impl std::str::FromStr for GatewayProtocol {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            _ => Err(format!("unknown protocol: {} (use http or https)", s)),
        }
    }
}

/// Immutable daemon configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway_host: String,
    pub gateway_port: u16,
    pub gateway_protocol: GatewayProtocol,
    pub listen_host: String,
    pub listen_port: u16,
    pub wallet_file: PathBuf,
    pub timeout: Duration,
    pub max_body_bytes: usize,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            gateway_host: cli.arweave_host,
            gateway_port: cli.arweave_port,
            gateway_protocol: cli.arweave_protocol,
            listen_host: cli.host,
            listen_port: cli.port,
            wallet_file: cli.wallet_file,
            timeout: Duration::from_secs(cli.timeout_secs),
            max_body_bytes: cli.max_body_bytes,
        }
    }
}

impl Config {
    /// Gateway base URL, e.g. `https://arweave.net:443`.
    pub fn gateway_url(&self) -> String {
        hooverd_rpc::gateway_url(
            &self.gateway_protocol.to_string(),
            &self.gateway_host,
            self.gateway_port,
        )
    }

    /// `host:port` of the gateway, as reported in confirmations.
    pub fn gateway_label(&self) -> String {
        format!("{}:{}", self.gateway_host, self.gateway_port)
    }

    /// `host:port` the daemon binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.listen_port)
    }
}
