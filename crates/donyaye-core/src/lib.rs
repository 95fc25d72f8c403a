//! Donyaye Serial Stremio Addon Core Library
//!
//! Provides the async pipeline behind a Stremio addon serving titles from
//! donyayeserial.com.
//!
//! # Overview
//!
//! This crate contains everything except the HTTP surface:
//! - Composite identifiers that carry a site slug and an IMDb reference
//! - HTML parsers for search cards, detail pages and directory listings
//! - Episode matching over raw file names
//! - Canonical metadata lookup with identifier rewriting
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use donyaye_core::{Addon, CatalogArgs, CatalogClient, Config, DonyayeSerial, MediaKind, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Arc::new(Config::from_env());
//!     let client = donyaye_core::build_http_client(&config)?;
//!     let addon = Addon::new(
//!         DonyayeSerial::with_client(client.clone(), &config),
//!         CatalogClient::new(client, &config),
//!         config,
//!     );
//!
//!     let args = CatalogArgs::parse("search=true detective");
//!     let results = addon.catalog("series", "donyayeserial_series", &args).await?;
//!
//!     if let Some(first) = results.first() {
//!         let meta = addon.meta(MediaKind::Series, &first.id).await?;
//!         println!("{}", meta["meta"]["name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Identifiers
//!
//! Every id handed to Stremio has the form
//! `ds_{provider}___{slug}[___{imdb ref}]`. Stream and subtitle requests
//! for episodes carry `tt…:{season}:{episode}` as the reference, which
//! [`EpisodeRef`] splits apart.

mod addon;
mod cinemeta;
mod client;
mod config;
mod donyaye;
mod error;
mod id;
mod manifest;
mod matcher;
pub mod parser;
mod provider;
mod tmdb;
mod types;
pub mod url;

// Re-export the request handling API
pub use addon::{Addon, CatalogArgs, FALLBACK_LOGO, fallback_meta, rewrite_meta};

// Re-export HTTP clients
pub use cinemeta::CatalogClient;
pub use client::{SiteClient, browser_headers, build_http_client};
pub use tmdb::TmdbClient;

// Re-export configuration
pub use config::{Config, ProxyConfig};

// Re-export error types
pub use error::{AddonError, Result, log_request_error};

// Re-export identifier codec
pub use id::{ADDON_PREFIX, CompositeId, EpisodeRef, ID_SEPARATOR};

// Re-export manifest types
pub use manifest::{CatalogDescriptor, CatalogExtra, Manifest, Resource};

// Re-export episode matching
pub use matcher::find_episode_file;

// Re-export providers
pub use donyaye::DonyayeSerial;
pub use provider::Provider;

// Re-export data types
pub use types::{DirectoryCandidate, MediaKind, MetaPreview, SourceItem, StreamLink};
