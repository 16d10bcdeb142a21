// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API request types

use serde::{Deserialize, Serialize};

use crate::search::{CacheKey, ResultKind, SafeSearch};

/// Query string for GET /api/search
///
/// Every field is kept as raw text so malformed values degrade to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Search query; only an absent `q` counts as "no query"
    pub q: Option<String>,

    /// `strict`, `moderate` or `off` (default strict)
    pub safe: Option<String>,

    /// Truthy (`true`, `1`, `yes`, `on`) for video results
    pub videos: Option<String>,

    /// Result page offset (default 0)
    pub page: Option<String>,
}

impl SearchQuery {
    pub fn safe_search(&self) -> SafeSearch {
        SafeSearch::from_param(self.safe.as_deref())
    }

    pub fn kind(&self) -> ResultKind {
        ResultKind::from_videos_flag(is_truthy(self.videos.as_deref()))
    }

    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Cache fingerprint for this request, or `None` when `q` is missing
    pub fn cache_key(&self) -> Option<CacheKey> {
        let query = self.q.as_ref()?;
        Some(CacheKey::new(query.clone(), self.safe_search(), self.kind(), self.page()))
    }
}

/// Query string for GET /api/images
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImagesQuery {
    /// Search query
    pub q: Option<String>,

    /// `strict`, `moderate` or `off` (default strict)
    pub safe: Option<String>,
}

impl ImagesQuery {
    pub fn safe_search(&self) -> SafeSearch {
        SafeSearch::from_param(self.safe.as_deref())
    }
}

/// Boolean query flag: `true`, `1`, `yes` or `on` in any case
pub fn is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "1" | "yes" | "on")
    )
}
