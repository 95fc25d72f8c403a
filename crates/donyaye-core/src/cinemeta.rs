//! Clients for the canonical metadata catalog and the subtitle catalog
//!
//! Both are read-only Stremio addons queried with the canonical id; their
//! JSON is passed through untyped so unknown fields survive.

use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::config::Config;
use crate::error::{AddonError, Result};
use crate::types::MediaKind;

/// Client for Cinemeta and the OpenSubtitles addon
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    meta_url: String,
    subtitles_url: String,
}

impl CatalogClient {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            meta_url: config.cinemeta_url.trim_end_matches('/').to_string(),
            subtitles_url: config.subtitles_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the canonical metadata record (`{"meta": {...}}`)
    pub async fn meta(&self, kind: MediaKind, canonical_id: &str) -> Result<Value> {
        let url = format!("{}/meta/{}/{}.json", self.meta_url, kind, canonical_id);
        self.get_json(&url).await
    }

    /// Fetches subtitles for a canonical id (`{"subtitles": [...]}`)
    ///
    /// Series ids carry the episode suffix (`tt123:1:2`).
    pub async fn subtitles(&self, kind: MediaKind, canonical_ref: &str) -> Result<Value> {
        let url = format!(
            "{}/subtitles/{}/{}.json",
            self.subtitles_url, kind, canonical_ref
        );
        self.get_json(&url).await
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        tracing::debug!(%url, "querying catalog");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AddonError::status(status.as_u16(), &body));
        }
        Ok(response.json().await?)
    }
}
