// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Brave Search API provider
//!
//! Issues web, video and image searches against the Brave Search API,
//! rotating through the configured API keys when a key is rate limited.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::config::{SearchConfig, DEFAULT_BRAVE_API_BASE_URL};
use super::provider::SearchBackend;
use super::types::{ImageResult, ResultKind, SafeSearch, SearchError, SearchResultItem};

const SUBSCRIPTION_TOKEN_HEADER: &str = "X-Subscription-Token";

/// Brave Search API client with key rotation
pub struct BraveClient {
    api_keys: Vec<String>,
    base_url: String,
    results_per_page: u32,
    timeout_ms: u64,
    client: Client,
}

impl BraveClient {
    /// Create a new Brave Search client
    ///
    /// # Arguments
    /// * `api_keys` - Brave Search API keys, tried in order on every request
    pub fn new(api_keys: Vec<String>) -> Result<Self, SearchError> {
        let defaults = SearchConfig::default();
        Self::build(
            api_keys,
            DEFAULT_BRAVE_API_BASE_URL.to_string(),
            defaults.results_per_page,
            defaults.request_timeout_ms,
        )
    }

    /// Create a client from the search configuration
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        Self::build(
            config.providers.brave_api_keys.clone(),
            config.providers.brave_base_url.clone(),
            config.results_per_page,
            config.request_timeout_ms,
        )
    }

    fn build(
        api_keys: Vec<String>,
        base_url: String,
        results_per_page: u32,
        timeout_ms: u64,
    ) -> Result<Self, SearchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| SearchError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_keys,
            base_url: base_url.trim_end_matches('/').to_string(),
            results_per_page,
            timeout_ms,
            client,
        })
    }

    /// Number of configured API keys
    pub fn key_count(&self) -> usize {
        self.api_keys.len()
    }

    fn endpoint(&self, kind: &str) -> String {
        format!("{}/{}/search", self.base_url, kind)
    }

    /// Single attempt with one key
    async fn attempt(
        &self,
        url: &str,
        params: &[(&str, String)],
        api_key: &str,
    ) -> Result<Response, SearchError> {
        let response = self
            .client
            .get(url)
            .header(SUBSCRIPTION_TOKEN_HEADER, api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(e, self.timeout_ms))?;

        match response.status() {
            StatusCode::OK => Ok(response),
            StatusCode::TOO_MANY_REQUESTS => Err(SearchError::RateLimited),
            status => Err(SearchError::ApiError {
                status: status.as_u16(),
            }),
        }
    }

    /// Try each key in order until one yields a 200.
    ///
    /// Rotation always restarts from the first key; nothing is remembered
    /// between calls.
    async fn send_with_rotation(&self, url: &str, params: &[(&str, String)]) -> Option<Response> {
        if self.api_keys.is_empty() {
            warn!(
                "{}",
                SearchError::NoApiKey {
                    provider: self.name().to_string()
                }
            );
            return None;
        }

        for (index, api_key) in self.api_keys.iter().enumerate() {
            match self.attempt(url, params, api_key).await {
                Ok(response) => {
                    debug!(key_index = index, "Search request succeeded");
                    return Some(response);
                }
                Err(e) => {
                    debug!(key_index = index, error = %e, "Search request failed, trying next key");
                }
            }
        }

        warn!(
            keys_tried = self.api_keys.len(),
            url, "All search API keys exhausted"
        );
        None
    }

    async fn json_body(response: Response) -> Option<Value> {
        match response.json::<Value>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(error = %e, "Search response was not valid JSON");
                None
            }
        }
    }
}

#[async_trait]
impl SearchBackend for BraveClient {
    async fn web_results(
        &self,
        query: &str,
        safe_search: SafeSearch,
        kind: ResultKind,
        page: u32,
    ) -> Option<Vec<SearchResultItem>> {
        let url = self.endpoint(kind.endpoint());
        let params = [
            ("q", query.to_string()),
            ("safesearch", safe_search.as_str().to_string()),
            ("count", self.results_per_page.to_string()),
            ("offset", page.to_string()),
        ];

        let response = self.send_with_rotation(&url, &params).await?;
        let body = Self::json_body(response).await?;
        Some(extract_results(&body, kind))
    }

    async fn image_results(&self, query: &str, safe_search: SafeSearch) -> Option<Vec<ImageResult>> {
        let url = self.endpoint("images");
        let params = [
            ("q", query.to_string()),
            ("safesearch", safe_search.as_str().to_string()),
        ];

        let response = self.send_with_rotation(&url, &params).await?;
        let body = Self::json_body(response).await?;
        Some(project_images(&body))
    }

    fn name(&self) -> &'static str {
        "brave"
    }

    fn is_available(&self) -> bool {
        !self.api_keys.is_empty()
    }

    fn credential_count(&self) -> usize {
        self.key_count()
    }
}

/// Pull the result list out of a provider payload.
///
/// Video searches return a flat `results` list; web searches nest it under
/// `web.results`. Missing pieces yield an empty list.
pub fn extract_results(payload: &Value, kind: ResultKind) -> Vec<SearchResultItem> {
    let pointer = if kind.is_video() { "/results" } else { "/web/results" };
    payload
        .pointer(pointer)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Project raw image results to `{url, img}`, dropping items without a thumbnail
pub fn project_images(payload: &Value) -> Vec<ImageResult> {
    let Some(items) = payload.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let url = item.get("url")?.as_str()?;
            let img = item.pointer("/thumbnail/src")?.as_str()?;
            Some(ImageResult {
                url: url.to_string(),
                img: img.to_string(),
            })
        })
        .collect()
}
