// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Parser;
use nilch_search::{cli::Cli, search::SearchConfig, start_server, version, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting {}", version::get_version_string());

    let config = SearchConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow!("Invalid search configuration: {}", e))?;

    if !config.has_any_key() {
        warn!("BRAVE_SEARCH_API_KEYS is empty; every search will return \"noresults\"");
    }
    info!(
        "Search configured: {} API key(s), cache capacity {}",
        config.providers.brave_api_keys.len(),
        config.cache_capacity
    );

    let state = AppState::from_config(&config)?;
    start_server(state, cli.server_config()).await
}
