//! Seismic and terrain visualization service.
//!
//! Serves DEM heightfields and SEG-Y density images, wiggle polylines and
//! volume stacks over HTTP.

pub mod config;
pub mod encode;
pub mod error;
pub mod handlers;
pub mod limits;
pub mod metrics;
pub mod operations;
pub mod state;

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Build the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(encode::EXPOSED_HEADERS);

    Router::new()
        // DEM
        .route("/api/dem", get(handlers::dem::dem_handler))
        // SEG-Y
        .route("/api/segy/info", get(handlers::segy::info_handler))
        .route("/api/segy/density", get(handlers::segy::density_handler))
        .route("/api/segy/wiggle", get(handlers::segy::wiggle_handler))
        .route("/api/segy/volume", get(handlers::segy::volume_handler))
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
