pub mod cli;
pub mod core;
pub mod providers;
pub mod relay;

use crate::cli::rates::RatesOptions;
use crate::core::config::AppConfig;
use crate::providers::cnb::CnbFeedProvider;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    /// Show the current fixing as a table
    Rates(RatesOptions),
    /// Convert a CZK amount; `code` falls back to the configured default
    Convert {
        amount: String,
        code: Option<String>,
    },
    /// Run the CORS relay; `bind` falls back to the configured address
    Serve { bind: Option<String> },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("cnbrates starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Rates(options) => {
            let feed = CnbFeedProvider::new(&config.feed.url)?;
            cli::rates::run(&feed, &options).await
        }
        AppCommand::Convert { amount, code } => {
            let feed = CnbFeedProvider::new(&config.feed.url)?;
            let code = code.unwrap_or(config.default_currency);
            cli::convert::run(&feed, &amount, &code).await
        }
        AppCommand::Serve { bind } => {
            let bind = bind.unwrap_or(config.relay.bind);
            let state = relay::RelayState::new(config.relay.upstream_url)?;
            relay::serve(&bind, state).await
        }
    }
}
