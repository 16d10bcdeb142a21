// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Dictionary definition instant answers

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::strategy::{endpoint_for, fetch_json, InfoboxStrategy};
use super::types::Infobox;
use crate::search::SearchResultItem;

const ENTRY_LINK_BASE: &str = "https://en.wiktionary.org/wiki/";

fn patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [r"(?i)^what does ([a-zA-Z]+) mean$", r"(?i)^define ([a-zA-Z]+)$"]
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    })
}

/// The word a query asks to define, if it is phrased as a definition request
pub fn extract_word(query: &str) -> Option<&str> {
    patterns()
        .iter()
        .find_map(|re| re.captures(query))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Looks up `define <word>` and `what does <word> mean` in Wiktionary
pub struct DefinitionStrategy {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl DefinitionStrategy {
    /// Create a new definition strategy
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client for dictionary lookups
    /// * `base_url` - Definition endpoint; the word is appended as a path segment
    /// * `timeout_ms` - Client timeout, reported in errors
    pub fn new(client: Client, base_url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout_ms,
        }
    }

    async fn lookup(&self, word: &str) -> Option<Infobox> {
        let url = endpoint_for(&self.base_url, word)?;

        let payload = match fetch_json(&self.client, url, self.timeout_ms).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(word, error = %e, "Definition lookup failed");
                return None;
            }
        };

        let infobox = parse_definition(word, &payload);
        if infobox.is_none() {
            debug!(word, "No English entries in definition response");
        }
        infobox
    }
}

/// Build a definition infobox from the first English entry.
///
/// Returns `None` when there are no English entries.
pub fn parse_definition(word: &str, payload: &Value) -> Option<Infobox> {
    let entry = payload.get("en")?.as_array()?.first()?;

    let definition = entry
        .get("definitions")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|d| d.get("definition").and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .map(str::to_string);

    Some(Infobox::Definition {
        word: word.to_string(),
        part_of_speech: entry
            .get("partOfSpeech")
            .and_then(Value::as_str)
            .map(str::to_string),
        definition,
        url: format!("{}{}", ENTRY_LINK_BASE, word),
    })
}

#[async_trait]
impl InfoboxStrategy for DefinitionStrategy {
    async fn resolve(&self, query: &str, _web_results: &[SearchResultItem]) -> Option<Infobox> {
        let word = extract_word(query)?;
        self.lookup(word).await
    }

    fn name(&self) -> &'static str {
        "definition"
    }

    fn priority(&self) -> u8 {
        20
    }
}
