//! moodmix-api library - mood-based music and radio suggestions
//!
//! Read-only endpoints (greetings, health, diagnostics, radio directory) plus
//! one rule-based recommendation endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use moodmix_common::db::Persistence;
use moodmix_common::{AliasTable, Catalog};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod recommend;

use recommend::RecommendationAssembler;

/// Application state shared across HTTP handlers
///
/// Catalog and alias tables are immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub aliases: Arc<AliasTable>,
    pub assembler: RecommendationAssembler,
}

impl AppState {
    /// Create new application state
    pub fn new(
        catalog: Catalog,
        aliases: AliasTable,
        persistence: Persistence,
        persist_timeout: Duration,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            aliases: Arc::new(aliases),
            assembler: RecommendationAssembler::new(persistence, persist_timeout),
        }
    }

    /// State backed by the curated reference catalog
    pub fn with_reference_catalog(persistence: Persistence, persist_timeout: Duration) -> Self {
        Self::new(
            Catalog::reference(),
            AliasTable::reference(),
            persistence,
            persist_timeout,
        )
    }
}

/// Build application router
///
/// CORS is wide open: any origin (mirrored, with credentials), method and header.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::root))
        .route("/api/hello", get(api::hello))
        .route("/test", get(api::diagnostics))
        .route("/api/radios", get(api::list_radios))
        .route("/api/agent/suggest", post(api::suggest))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/health", get(api::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
