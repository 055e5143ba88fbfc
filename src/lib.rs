pub mod cli;
pub mod core;
pub mod providers;
pub mod server;
pub mod store;

use crate::core::config::AppConfig;
use crate::providers::{ExchangeRateApiProvider, RateCache};
use crate::store::MemoryTransactionStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Serve,
    Rates,
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Builds the rate cache described by `config`.
pub fn build_rate_cache(config: &AppConfig) -> RateCache {
    let provider = ExchangeRateApiProvider::new(config.providers.exchange_rate_url());
    RateCache::with_system_clock(Arc::new(provider), config.rates.ttl())
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Expense Tracker starting...");

    let config = load_config(config_path)?;
    let rates = build_rate_cache(&config);

    match command {
        AppCommand::Serve => {
            info!(
                ttl_hours = rates.ttl().num_hours(),
                "Exchange rates are cached in memory"
            );
            let store = Arc::new(MemoryTransactionStore::new());
            let state = server::AppState::new(rates, store, &config);
            server::serve(&config, server::build_router(state)).await
        }
        AppCommand::Rates => {
            println!("{}", cli::rates::display_rates(&rates).await);
            Ok(())
        }
        AppCommand::Convert { amount, from, to } => {
            let line = cli::convert::display_conversion(&rates, amount, &from, &to).await?;
            println!("{line}");
            Ok(())
        }
    }
}
