// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wikipedia summary instant answers

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::strategy::{endpoint_for, fetch_json, InfoboxStrategy};
use super::types::Infobox;
use crate::search::SearchResultItem;

/// Only this many leading web results are considered
pub const MAX_CANDIDATES: usize = 3;

const TITLE_SUFFIX: &str = " - Wikipedia";

/// Summarises the first Wikipedia page among the top web results
pub struct WikipediaStrategy {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl WikipediaStrategy {
    pub fn new(client: Client, base_url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout_ms,
        }
    }

    async fn summary(&self, title: &str) -> Option<Infobox> {
        let url = endpoint_for(&self.base_url, title)?;

        match fetch_json(&self.client, url, self.timeout_ms).await {
            Ok(payload) => Some(parse_summary(&payload)),
            Err(e) => {
                warn!(title, error = %e, "Wikipedia summary lookup failed, trying next candidate");
                None
            }
        }
    }
}

/// Page titles for the Wikipedia links among the first few results, in order
pub fn candidate_titles(web_results: &[SearchResultItem]) -> Vec<String> {
    web_results
        .iter()
        .take(MAX_CANDIDATES)
        .filter(|result| {
            result
                .get("url")
                .and_then(Value::as_str)
                .is_some_and(|url| url.contains("wikipedia.org"))
        })
        .map(|result| {
            let title = result.get("title").and_then(Value::as_str).unwrap_or_default();
            page_title(title)
        })
        .collect()
}

/// `"Rust (programming language) - Wikipedia"` becomes `"Rust_(programming_language)"`
pub fn page_title(result_title: &str) -> String {
    result_title
        .split(TITLE_SUFFIX)
        .next()
        .unwrap_or_default()
        .replace(' ', "_")
}

/// Build a wikipedia infobox from a page summary; missing fields stay `None`
pub fn parse_summary(payload: &Value) -> Infobox {
    let text = |pointer: &str| payload.pointer(pointer).and_then(Value::as_str).map(str::to_string);

    Infobox::Wikipedia {
        title: text("/title"),
        info: text("/extract"),
        url: text("/content_urls/desktop/page"),
    }
}

#[async_trait]
impl InfoboxStrategy for WikipediaStrategy {
    async fn resolve(&self, _query: &str, web_results: &[SearchResultItem]) -> Option<Infobox> {
        for title in candidate_titles(web_results) {
            debug!(title = %title, "Requesting Wikipedia summary");
            if let Some(infobox) = self.summary(&title).await {
                return Some(infobox);
            }
        }
        None
    }

    fn name(&self) -> &'static str {
        "wikipedia"
    }

    fn priority(&self) -> u8 {
        30
    }
}
