// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API endpoint handlers

use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;
use tracing::{debug, info};

use super::request::{ImagesQuery, SearchQuery};
use super::response::{ImagesReply, SearchApiResponse, SearchReply};
use crate::api::http_server::AppState;

/// GET /api/search - Web or video search with an instant answer
///
/// # Query
/// - `q`: Search query (required; absent yields `"noquery"`)
/// - `safe`: `strict` | `moderate` | `off` (default strict)
/// - `videos`: truthy for video results (default false)
/// - `page`: Result page offset (default 0)
///
/// # Response
/// - `infobox`: Instant answer object, or the string `"null"`
/// - `results`: Provider results, unchanged
///
/// `"noresults"` is returned when the provider could not be reached with any key.
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(request): Query<SearchQuery>,
) -> Json<SearchReply> {
    let Some(key) = request.cache_key() else {
        return Json(SearchReply::no_query());
    };

    let results = match state.cache.get(&key) {
        Some(results) => {
            debug!(query = %key.query, page = key.page, "Returning results from cache");
            results
        }
        None => {
            debug!(query = %key.query, page = key.page, "Cache miss, querying {}", state.search.name());
            match state
                .search
                .web_results(&key.query, key.safe_search, key.kind, key.page)
                .await
            {
                Some(fetched) => state.cache.put(key.clone(), fetched),
                None => return Json(SearchReply::no_results()),
            }
        }
    };

    let infobox = if key.kind.is_video() {
        None
    } else {
        state.infobox.resolve(&key.query, &results).await
    };

    info!(
        "Search complete: {} results for '{}' (infobox: {})",
        results.len(),
        key.query,
        infobox.as_ref().map(|i| i.infotype()).unwrap_or("none")
    );

    Json(SearchReply::Payload(SearchApiResponse { infobox, results }))
}

/// GET /api/images - Image search
///
/// # Query
/// - `q`: Search query (required; absent yields `"noquery"`)
/// - `safe`: `strict` | `moderate` | `off` (default strict)
///
/// # Response
/// Array of `{url, img}`, or `"noresults"`. Image results are never cached.
pub async fn images_handler(
    State(state): State<Arc<AppState>>,
    Query(request): Query<ImagesQuery>,
) -> Json<ImagesReply> {
    let Some(query) = request.q.as_deref() else {
        return Json(ImagesReply::no_query());
    };

    match state.search.image_results(query, request.safe_search()).await {
        Some(images) => {
            info!("Image search complete: {} results for '{}'", images.len(), query);
            Json(ImagesReply::Payload(images))
        }
        None => Json(ImagesReply::no_results()),
    }
}
