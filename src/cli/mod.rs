// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use std::env;

use crate::api::http_server::ServerConfig;
use crate::api::search::request::is_truthy;

/// nilch search backend
#[derive(Parser, Debug)]
#[command(name = "nilch-search")]
#[command(version)]
#[command(about = "Search proxy with result caching and instant answers", long_about = None)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "NILCH_PORT", default_value_t = 5001)]
    pub port: u16,

    /// Verbose logging (also enabled by a truthy NILCH_DEBUG)
    #[arg(long)]
    pub debug: bool,

    /// Comma-separated list of allowed CORS origins, or `*`
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    pub cors_origins: Vec<String>,
}

impl Cli {
    /// Debug mode from the flag or the NILCH_DEBUG environment variable
    pub fn debug_enabled(&self) -> bool {
        self.debug || is_truthy(env::var("NILCH_DEBUG").ok().as_deref())
    }

    /// Default log filter when RUST_LOG is not set
    pub fn default_log_level(&self) -> &'static str {
        if self.debug_enabled() {
            "debug"
        } else {
            "info"
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self
                .cors_origins
                .iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
        }
    }
}
