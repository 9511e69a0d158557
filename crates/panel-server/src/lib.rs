//! HTTP surface for the synthetic panel.
//!
//! ```text
//! GET  /api/health
//! GET  /api/personas
//! GET  /api/segments
//! POST /api/test
//! GET  /api/results
//! GET  /api/results/:id
//! *    -> prebuilt frontend bundle, when one is available
//! ```

pub mod error;
pub mod handlers;
pub mod telemetry;

use axum::Router;
use axum::routing::{get, post};
use panel_application::FocusGroupService;
use panel_core::config::ServerConfig;
use panel_infrastructure::paths::PanelPaths;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FocusGroupService>,
}

impl AppState {
    pub fn new(service: FocusGroupService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Builds the application router.
///
/// Unmatched paths are served from `frontend_dir` when given, with
/// `index.html` answering for files that do not exist.
pub fn build_router(state: AppState, frontend_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/personas", get(handlers::personas))
        .route("/api/segments", get(handlers::segments))
        .route("/api/test", post(handlers::run_test))
        .route("/api/results", get(handlers::results))
        .route("/api/results/:id", get(handlers::result))
        .with_state(state);

    let router = match frontend_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Frontend bundle to serve: the configured directory, or `frontend/build`
/// when it exists. Missing directories disable static serving.
pub fn resolve_frontend_dir(server: &ServerConfig) -> Option<PathBuf> {
    match &server.frontend_dir {
        Some(dir) if dir.is_dir() => Some(dir.clone()),
        Some(dir) => {
            tracing::warn!(
                "[Server] Frontend directory {} not found, static serving disabled",
                dir.display()
            );
            None
        }
        None => Some(PanelPaths::default_frontend_dir()).filter(|dir| dir.is_dir()),
    }
}
