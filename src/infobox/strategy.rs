// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Instant answer strategy trait definition

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use super::types::Infobox;
use crate::search::{SearchError, SearchResultItem};

/// Trait for implementing instant answer strategies
///
/// The resolver tries strategies in priority order and keeps the first answer.
#[async_trait]
pub trait InfoboxStrategy: Send + Sync {
    /// Try to answer a query
    ///
    /// # Arguments
    /// * `query` - The raw search query
    /// * `web_results` - Results already fetched for the query
    ///
    /// # Returns
    /// An instant answer, or `None` if this strategy has nothing to offer
    async fn resolve(&self, query: &str, web_results: &[SearchResultItem]) -> Option<Infobox>;

    /// Get the strategy name for logging
    fn name(&self) -> &'static str;

    /// Get strategy priority (lower = tried first)
    fn priority(&self) -> u8 {
        100
    }
}

/// Append `segment` to `base` as a single, percent-encoded path segment
pub(crate) fn endpoint_for(base: &str, segment: &str) -> Option<Url> {
    let mut url = Url::parse(base).ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().push(segment);
    Some(url)
}

/// GET a JSON document, treating anything but a 200 as a failure
pub(crate) async fn fetch_json(client: &Client, url: Url, timeout_ms: u64) -> Result<Value, SearchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SearchError::from_reqwest(e, timeout_ms))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(SearchError::ApiError {
            status: status.as_u16(),
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| SearchError::Decode(e.to_string()))
}
