//! Startup banner.

use hooverd_types::winston_to_ar;
use hooverd_wallet::Signer;

use crate::config::Config;
use crate::ledger::Ledger;

/// What the daemon learned about its wallet and gateway before serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub address: String,
    /// Winston; `None` when the gateway could not be asked.
    pub balance: Option<u128>,
    pub height: Option<u64>,
}

/// Query the gateway for the wallet balance and network height, and log the
/// banner. Gateway failures are warnings only.
pub async fn announce(config: &Config, ledger: &dyn Ledger, signer: &dyn Signer) -> StartupReport {
    let address = signer.address();

    let balance = match ledger.balance(&address).await {
        Ok(winston) => Some(winston),
        Err(e) => {
            log::warn!("could not fetch balance of {}: {}", address, e);
            None
        }
    };
    let height = match ledger.network_info().await {
        Ok(info) => Some(info.height),
        Err(e) => {
            log::warn!("could not fetch network info from {}: {}", config.gateway_url(), e);
            None
        }
    };

    log::info!("Welcome to hooverd!");
    log::info!("...starting a server at http://{}", config.listen_addr());
    match balance {
        Some(winston) => log::info!(
            "...using wallet {} (balance: {} AR)",
            address,
            winston_to_ar(winston)
        ),
        None => log::info!("...using wallet {} (balance unknown)", address),
    }
    match height {
        Some(height) => log::info!(
            "...dispatching transactions to gateway {}, synchronised at block {}",
            config.gateway_label(),
            height
        ),
        None => log::info!(
            "...dispatching transactions to gateway {}",
            config.gateway_label()
        ),
    }

    StartupReport {
        address,
        balance,
        height,
    }
}
