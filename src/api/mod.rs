// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod http_server;
pub mod search;

pub use http_server::{create_app, create_app_with_cors, start_server, AppState, HealthResponse, ServerConfig};
pub use search::{images_handler, search_handler, SearchApiResponse, SearchQuery};
