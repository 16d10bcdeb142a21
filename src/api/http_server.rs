// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::State,
    http::HeaderValue,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::search::{images_handler, search_handler};
use crate::infobox::InfoboxResolver;
use crate::search::{BraveClient, CacheStats, ResultCache, SearchBackend, SearchConfig, SearchError};
use crate::version;

/// Shared state injected into every handler
pub struct AppState {
    pub cache: Arc<ResultCache>,
    pub search: Arc<dyn SearchBackend>,
    pub infobox: Arc<InfoboxResolver>,
}

impl AppState {
    pub fn new(
        cache: Arc<ResultCache>,
        search: Arc<dyn SearchBackend>,
        infobox: Arc<InfoboxResolver>,
    ) -> Self {
        Self {
            cache,
            search,
            infobox,
        }
    }

    /// Wire up the production state: Brave client, FIFO cache and the standard resolver
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let infobox = InfoboxResolver::new(config)?;
        tracing::info!("Instant answer strategies: {}", infobox.strategy_names().join(", "));

        Ok(Self::new(
            Arc::new(ResultCache::new(config.cache_capacity)),
            Arc::new(BraveClient::from_config(config)?),
            Arc::new(infobox),
        ))
    }
}

/// HTTP server settings taken from the command line
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `*` or an explicit list of allowed origins
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            cors_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the upstream provider has credentials to search with
    pub upstream: bool,
    pub cache: CacheStats,
    pub credentials: usize,
}

/// Build the router with the default CORS policy (any origin)
pub fn create_app(state: Arc<AppState>) -> Router {
    create_app_with_cors(state, &["*".to_string()])
}

/// Build the router, allowing the given origins (`*` for any)
pub fn create_app_with_cors(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        // Search endpoints
        .route("/api/search", get(search_handler))
        .route("/api/images", get(images_handler))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}

pub async fn start_server(state: AppState, config: ServerConfig) -> anyhow::Result<()> {
    let app = create_app_with_cors(Arc::new(state), &config.cors_origins);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: version::VERSION_NUMBER,
        upstream: state.search.is_available(),
        cache: state.cache.stats(),
        credentials: state.search.credential_count(),
    })
}

async fn version_handler() -> impl IntoResponse {
    Json(version::get_version_info())
}
