//! Walletweb main entry point

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;
use walletweb_api::start_server;
use walletweb_client::WalletApiClient;
use walletweb_config::Config;
use walletweb_core::DashboardState;

#[derive(Parser, Debug)]
#[command(name = "walletweb")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight wallet transaction dashboard", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config)?;

    // RUST_LOG wins over the configured level when set.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.level),
    )
    .init();

    eprintln!(
        "[INFO] Config loaded: api={}, wallet_id={}",
        config.api.base_url, config.api.wallet_id
    );

    let rt = Runtime::new()?;

    rt.block_on(async {
        let client = Arc::new(WalletApiClient::new(config.api.base_url.clone()));
        let dashboard = Arc::new(RwLock::new(DashboardState::new()));

        start_server(config, dashboard, client).await;
    });

    Ok(())
}
