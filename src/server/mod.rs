//! HTTP API layer: application state and router.

pub mod handlers;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::pmc::{PdfStorage, PmcClient};
use crate::pubmed::PubMedClient;
use crate::server::handlers::{download_pdf, einfo_pubmed, search_pubmed};

/// Shared state injected into every handler
pub struct AppState {
    pub pubmed: PubMedClient,
    pub pmc: PmcClient,
    pub storage: PdfStorage,
}

impl AppState {
    /// Build all clients and storage from one configuration
    pub fn new(config: &Config) -> Self {
        Self {
            pubmed: PubMedClient::with_config(config),
            pmc: PmcClient::with_config(config),
            storage: PdfStorage::from_config(config),
        }
    }
}

pub type SharedState = Arc<AppState>;

/// Build the full API router
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/search", get(search_pubmed))
        .route("/einfo", get(einfo_pubmed))
        .route("/download", get(download_pdf))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
