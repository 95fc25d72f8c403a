//! Donyaye Serial Stremio Addon Server
//!
//! Exposes the [`donyaye_core::Addon`] over the Stremio addon protocol:
//!
//! - `GET /manifest.json`
//! - `GET /catalog/{type}/{id}/{extra}.json`
//! - `GET /meta/{type}/{id}.json`
//! - `GET /stream/{type}/{id}.json`
//! - `GET /subtitles/{type}/{id}/{extra}.json`
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use donyaye_core::Config;
//! use donyaye_server::{AppState, router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = AppState::new(Arc::new(Config::default()))?;
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:7001").await?;
//!     axum::serve(listener, router(state)).await?;
//!     Ok(())
//! }
//! ```

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod handlers;
mod state;

pub use handlers::{CatalogResponse, StreamsResponse};
pub use state::AppState;

/// Builds the addon router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/manifest.json", get(handlers::manifest))
        .route("/catalog/{type}/{id}", get(handlers::catalog))
        .route("/catalog/{type}/{id}/{extra}", get(handlers::catalog_with_extra))
        .route("/meta/{type}/{id}", get(handlers::meta))
        .route("/stream/{type}/{id}", get(handlers::stream))
        .route("/subtitles/{type}/{id}", get(handlers::subtitles))
        .route("/subtitles/{type}/{id}/{extra}", get(handlers::subtitles_with_extra))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
