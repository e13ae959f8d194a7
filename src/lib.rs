pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::rates::SessionRates;
use crate::core::resolver::QuoteResolver;
use crate::providers::yahoo::{YahooCurrencyProvider, YahooFinanceProvider};
use crate::store::disk::DiskStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Summary,
    Add {
        symbol: String,
        quantity: u32,
        buy_price: f64,
    },
    List,
    Remove {
        ids: Vec<u64>,
    },
    Clear {
        yes: bool,
    },
    Stats,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Portfolio tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = DiskStore::open(&config.data_dir()?, config.markets.clone())?;

    let base_url = config
        .providers
        .yahoo
        .as_ref()
        .map_or("https://query1.finance.yahoo.com", |p| &p.base_url);
    let quote_provider = Arc::new(YahooFinanceProvider::new(base_url));
    let rate_provider = Arc::new(YahooCurrencyProvider::new(base_url));

    let resolver = QuoteResolver::new(config.markets.clone(), quote_provider);
    let rates = SessionRates::new(rate_provider, config.fallback_usd_inr);

    match command {
        AppCommand::Summary => cli::summary::run(&store, &resolver, &rates).await,
        AppCommand::Add {
            symbol,
            quantity,
            buy_price,
        } => cli::add::run(&store, &resolver, &symbol, quantity, buy_price).await,
        AppCommand::List => cli::list::run(&store),
        AppCommand::Remove { ids } => cli::remove::run(&store, &ids),
        AppCommand::Clear { yes } => cli::remove::clear(&store, yes),
        AppCommand::Stats => cli::stats::run(&store),
    }
}
