// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API endpoints
//!
//! Provides the `/api/search` and `/api/images` HTTP endpoints.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{images_handler, search_handler};
pub use request::{ImagesQuery, SearchQuery};
pub use response::{ApiReply, ImagesReply, SearchApiResponse, SearchReply};
