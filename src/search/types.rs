// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for web search functionality

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Content-filtering strictness forwarded to the search provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    #[default]
    Strict,
    Moderate,
    Off,
}

impl SafeSearch {
    /// Value sent as the provider's `safesearch` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SafeSearch::Strict => "strict",
            SafeSearch::Moderate => "moderate",
            SafeSearch::Off => "off",
        }
    }

    /// Lenient parse used at the HTTP boundary: unknown values fall back to strict
    pub fn from_param(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl std::str::FromStr for SafeSearch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(SafeSearch::Strict),
            "moderate" => Ok(SafeSearch::Moderate),
            "off" => Ok(SafeSearch::Off),
            _ => Err(format!("Unknown safe search level: {}", s)),
        }
    }
}

/// Which result list a search asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    Web,
    Video,
}

impl ResultKind {
    pub fn from_videos_flag(is_videos: bool) -> Self {
        if is_videos {
            ResultKind::Video
        } else {
            ResultKind::Web
        }
    }

    /// Path segment of the provider endpoint
    pub fn endpoint(&self) -> &'static str {
        match self {
            ResultKind::Web => "web",
            ResultKind::Video => "videos",
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, ResultKind::Video)
    }
}

/// Fingerprint of a search request.
///
/// Matching is exact on every field: no case folding, no trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub query: String,
    pub safe_search: SafeSearch,
    pub kind: ResultKind,
    pub page: u32,
}

impl CacheKey {
    pub fn new(query: impl Into<String>, safe_search: SafeSearch, kind: ResultKind, page: u32) -> Self {
        Self {
            query: query.into(),
            safe_search,
            kind,
            page,
        }
    }
}

/// Web and video results are passed through to the consumer untouched
pub type SearchResultItem = Value;

/// A single image result, projected from the provider's richer schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Page the image was found on
    pub url: String,
    /// Thumbnail source URL
    pub img: String,
}

/// Errors that can occur while talking to an upstream service.
///
/// These never reach the HTTP consumer; callers log them and degrade to "absent".
#[derive(Debug, Error)]
pub enum SearchError {
    /// Rate limited by the search provider
    #[error("Rate limited by upstream")]
    RateLimited,

    /// Non-success status from an upstream service
    #[error("Upstream API error: {status}")]
    ApiError {
        /// HTTP status code
        status: u16,
    },

    /// Request timed out
    #[error("Upstream timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Connection, DNS or other transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded
    #[error("Invalid upstream payload: {0}")]
    Decode(String),

    /// No credentials configured for the provider
    #[error("No API key configured for {provider}")]
    NoApiKey {
        /// Name of the provider missing API keys
        provider: String,
    },
}

impl SearchError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            SearchError::Timeout { timeout_ms }
        } else if err.is_decode() {
            SearchError::Decode(err.to_string())
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}
