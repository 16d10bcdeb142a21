// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search backend trait definition

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::types::{ImageResult, ResultKind, SafeSearch, SearchResultItem};

/// Trait for the upstream search provider used by the request handlers.
///
/// Both operations return `None` when no result could be obtained. Failures are
/// logged by the implementation and never surfaced to the caller.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Fetch a page of web or video results
    async fn web_results(
        &self,
        query: &str,
        safe_search: SafeSearch,
        kind: ResultKind,
        page: u32,
    ) -> Option<Vec<SearchResultItem>>;

    /// Fetch image results, dropping items without a thumbnail
    async fn image_results(&self, query: &str, safe_search: SafeSearch) -> Option<Vec<ImageResult>>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;

    /// Check if the provider can make requests (has credentials, etc.)
    fn is_available(&self) -> bool;

    /// Number of credentials the provider rotates through
    fn credential_count(&self) -> usize;
}
