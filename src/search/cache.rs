// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fixed-capacity FIFO cache for search results
//!
//! Entries are kept in first-fetch order. Reads never reorder anything, so
//! this is a plain queue rather than an LRU.

use serde::Serialize;
use std::collections::VecDeque;
use std::sync::RwLock;

use super::types::{CacheKey, SearchResultItem};

/// Default number of cached searches
pub const DEFAULT_CACHE_CAPACITY: usize = 20;

/// In-memory FIFO cache for search results
pub struct ResultCache {
    entries: RwLock<VecDeque<CacheEntry>>,
    capacity: usize,
}

struct CacheEntry {
    key: CacheKey,
    results: Vec<SearchResultItem>,
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently stored
    pub entries: usize,
    /// Maximum cache capacity
    pub capacity: usize,
}

impl ResultCache {
    /// Create a new cache holding at most `capacity` searches (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Look up results for an exact key match
    pub fn get(&self, key: &CacheKey) -> Option<Vec<SearchResultItem>> {
        let entries = self.entries.read().ok()?;
        entries
            .iter()
            .find(|entry| &entry.key == key)
            .map(|entry| entry.results.clone())
    }

    /// Store results and hand them back, evicting the oldest entry past capacity
    pub fn put(&self, key: CacheKey, results: Vec<SearchResultItem>) -> Vec<SearchResultItem> {
        let mut entries = match self.entries.write() {
            Ok(e) => e,
            Err(_) => return results,
        };

        entries.push_back(CacheEntry {
            key,
            results: results.clone(),
        });
        while entries.len() > self.capacity {
            entries.pop_front();
        }

        results
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read().map(|e| e.len()).unwrap_or(0);
        CacheStats {
            entries,
            capacity: self.capacity,
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
