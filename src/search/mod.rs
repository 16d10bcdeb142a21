// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upstream web search module
//!
//! Provides the search side of the `/api/search` and `/api/images` endpoints:
//! - Brave Search client with API key rotation on rate limits
//! - Fixed-capacity FIFO result cache
//! - Graceful degradation: upstream failures become "no result", never errors

pub mod brave;
pub mod cache;
pub mod config;
pub mod provider;
pub mod types;

// Re-export commonly used types
pub use brave::BraveClient;
pub use cache::{CacheStats, ResultCache};
pub use config::SearchConfig;
pub use provider::SearchBackend;
pub use types::{CacheKey, ImageResult, ResultKind, SafeSearch, SearchError, SearchResultItem};
