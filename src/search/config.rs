// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for web search functionality

use std::env;

use super::cache::DEFAULT_CACHE_CAPACITY;

pub const DEFAULT_BRAVE_API_BASE_URL: &str = "https://api.search.brave.com/res/v1";
pub const DEFAULT_WIKTIONARY_API_BASE_URL: &str =
    "https://en.wiktionary.org/api/rest_v1/page/definition";
pub const DEFAULT_WIKIPEDIA_API_BASE_URL: &str =
    "https://en.wikipedia.org/api/rest_v1/page/summary";

/// Configuration for web search functionality
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Provider-specific configuration
    pub providers: SearchProviderConfig,
    /// Maximum number of cached searches
    pub cache_capacity: usize,
    /// Results requested per page
    pub results_per_page: u32,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

/// Upstream endpoints and credentials
#[derive(Debug, Clone)]
pub struct SearchProviderConfig {
    /// Brave Search API keys, tried in order on every request
    pub brave_api_keys: Vec<String>,
    /// Brave Search API base URL (without the `/web/search` suffix)
    pub brave_base_url: String,
    /// Dictionary definition endpoint (word is appended as a path segment)
    pub wiktionary_base_url: String,
    /// Encyclopedia summary endpoint (title is appended as a path segment)
    pub wikipedia_base_url: String,
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            providers: SearchProviderConfig {
                brave_api_keys: env::var("BRAVE_SEARCH_API_KEYS")
                    .map(|v| parse_api_keys(&v))
                    .unwrap_or_default(),
                brave_base_url: env::var("BRAVE_API_BASE_URL")
                    .unwrap_or(defaults.providers.brave_base_url),
                wiktionary_base_url: env::var("WIKTIONARY_API_BASE_URL")
                    .unwrap_or(defaults.providers.wiktionary_base_url),
                wikipedia_base_url: env::var("WIKIPEDIA_API_BASE_URL")
                    .unwrap_or(defaults.providers.wikipedia_base_url),
            },
            cache_capacity: env::var("SEARCH_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_capacity),
            results_per_page: defaults.results_per_page,
            request_timeout_ms: defaults.request_timeout_ms,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.cache_capacity == 0 {
            return Err("Cache capacity must be greater than 0".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        for (name, base) in [
            ("BRAVE_API_BASE_URL", &self.providers.brave_base_url),
            ("WIKTIONARY_API_BASE_URL", &self.providers.wiktionary_base_url),
            ("WIKIPEDIA_API_BASE_URL", &self.providers.wikipedia_base_url),
        ] {
            url::Url::parse(base).map_err(|e| format!("{} is not a valid URL: {}", name, e))?;
        }
        Ok(())
    }

    /// Check if any search credential is configured
    pub fn has_any_key(&self) -> bool {
        !self.providers.brave_api_keys.is_empty()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            providers: SearchProviderConfig {
                brave_api_keys: Vec::new(),
                brave_base_url: DEFAULT_BRAVE_API_BASE_URL.to_string(),
                wiktionary_base_url: DEFAULT_WIKTIONARY_API_BASE_URL.to_string(),
                wikipedia_base_url: DEFAULT_WIKIPEDIA_API_BASE_URL.to_string(),
            },
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            results_per_page: 10,
            request_timeout_ms: 10000,
        }
    }
}

/// Split a comma-separated key list, dropping blanks and keeping order
pub fn parse_api_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
