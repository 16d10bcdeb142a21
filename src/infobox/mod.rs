// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Instant answer ("infobox") resolution
//!
//! Strategies are tried in priority order and the first answer wins:
//! - arithmetic evaluation of the query
//! - dictionary definition lookup
//! - Wikipedia summary of a top web result

pub mod calc;
pub mod definition;
pub mod expr;
pub mod strategy;
pub mod types;
pub mod wikipedia;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::search::{SearchConfig, SearchError, SearchResultItem};

pub use calc::CalcStrategy;
pub use definition::DefinitionStrategy;
pub use strategy::InfoboxStrategy;
pub use types::{serialize_infobox_or_null, Infobox};
pub use wikipedia::WikipediaStrategy;

/// User agent sent to the dictionary and encyclopedia APIs
pub const LOOKUP_USER_AGENT: &str = "nilch/1.0 (jake.stbu@gmail.com)";

/// Runs instant answer strategies in priority order
pub struct InfoboxResolver {
    strategies: Vec<Box<dyn InfoboxStrategy>>,
}

impl InfoboxResolver {
    /// Create the standard resolver: calc, then definition, then wikipedia
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(LOOKUP_USER_AGENT));

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let providers = &config.providers;
        Ok(Self::with_strategies(vec![
            Box::new(CalcStrategy::new()),
            Box::new(DefinitionStrategy::new(
                client.clone(),
                providers.wiktionary_base_url.clone(),
                config.request_timeout_ms,
            )),
            Box::new(WikipediaStrategy::new(
                client,
                providers.wikipedia_base_url.clone(),
                config.request_timeout_ms,
            )),
        ]))
    }

    /// Create a resolver from an explicit strategy list (sorted by priority)
    pub fn with_strategies(mut strategies: Vec<Box<dyn InfoboxStrategy>>) -> Self {
        strategies.sort_by_key(|s| s.priority());
        Self { strategies }
    }

    /// Strategy names in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve the instant answer for a query, if any strategy produces one
    ///
    /// # Arguments
    /// * `query` - The raw search query
    /// * `web_results` - Results already fetched for the query (used by the Wikipedia fallback)
    pub async fn resolve(&self, query: &str, web_results: &[SearchResultItem]) -> Option<Infobox> {
        for strategy in &self.strategies {
            if let Some(infobox) = strategy.resolve(query, web_results).await {
                info!(strategy = strategy.name(), "Instant answer resolved");
                return Some(infobox);
            }
            debug!(strategy = strategy.name(), "No instant answer");
        }
        None
    }
}
