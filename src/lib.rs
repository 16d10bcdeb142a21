// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod infobox;
pub mod search;
pub mod version;

// Re-export main types
pub use api::http_server::{create_app, start_server, AppState, ServerConfig};
pub use infobox::{Infobox, InfoboxResolver, InfoboxStrategy};
pub use search::{BraveClient, ResultCache, SearchBackend, SearchConfig};
