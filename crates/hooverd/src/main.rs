use clap::Parser;
use hooverd::api::{create_router, AppState};
use hooverd::{startup, Cli, Config, Hoover};
use hooverd_rpc::{GatewayRpc, RpcConfig};
use hooverd_wallet::Wallet;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    if let Err(e) = run(Config::from(cli)).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let wallet = Arc::new(Wallet::load(&config.wallet_file)?);
    let gateway = Arc::new(GatewayRpc::with_config(RpcConfig {
        url: config.gateway_url(),
        timeout: config.timeout,
    })?);

    startup::announce(&config, gateway.as_ref(), wallet.as_ref()).await;

    let hoover = Hoover::new(gateway, wallet, config.gateway_label(), config.timeout);
    let state = Arc::new(AppState {
        hoover,
        max_body_bytes: config.max_body_bytes,
    });

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    log::info!("...now ready to hoover data!");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("hooverd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}
