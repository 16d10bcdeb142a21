// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API response types

use serde::Serialize;

use crate::infobox::{serialize_infobox_or_null, Infobox};
use crate::search::{ImageResult, SearchResultItem};

/// Body returned when the request has no `q` parameter
pub const NO_QUERY: &str = "noquery";

/// Body returned when the upstream provider yielded nothing
pub const NO_RESULTS: &str = "noresults";

/// Results plus optional instant answer for GET /api/search
#[derive(Debug, Clone, Serialize)]
pub struct SearchApiResponse {
    /// Instant answer, or the string `"null"` when there is none
    #[serde(serialize_with = "serialize_infobox_or_null")]
    pub infobox: Option<Infobox>,

    /// Provider results, passed through unchanged
    pub results: Vec<SearchResultItem>,
}

/// Either a status sentinel string or a full payload
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ApiReply<T> {
    Status(&'static str),
    Payload(T),
}

impl<T> ApiReply<T> {
    pub fn no_query() -> Self {
        ApiReply::Status(NO_QUERY)
    }

    pub fn no_results() -> Self {
        ApiReply::Status(NO_RESULTS)
    }
}

pub type SearchReply = ApiReply<SearchApiResponse>;
pub type ImagesReply = ApiReply<Vec<ImageResult>>;
