//! Title-search client used to recover IMDb ids from TMDB
//!
//! Only used when a title page does not link to IMDb itself.

use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{AddonError, Result};

const JSON: &str = "application/json";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: i64,
    media_type: Option<String>,
    name: Option<String>,
}

impl SearchResult {
    /// `tv` or `movie`; people and untyped results are guessed from `name`
    fn detail_type(&self) -> &str {
        match self.media_type.as_deref() {
            Some(kind) if !kind.is_empty() => kind,
            _ if self.name.is_some() => "tv",
            _ => "movie",
        }
    }
}

#[derive(Debug, Deserialize)]
struct Details {
    external_ids: Option<ExternalIds>,
}

#[derive(Debug, Deserialize)]
struct ExternalIds {
    imdb_id: Option<String>,
}

/// TMDB client
#[derive(Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.tmdb_url.trim_end_matches('/').to_string(),
            api_key: config.tmdb_api_key.clone(),
        }
    }

    /// Whether a credential is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Searches a title and returns the IMDb id of the best match
    ///
    /// # Arguments
    /// * `title` - Cleaned title
    /// * `year` - Release year, narrows the search when present
    ///
    /// # Returns
    /// `Ok(None)` when nothing matched or the match has no IMDb id
    ///
    /// # Errors
    /// - `MissingCredential` if no API key is configured
    /// - `HttpError` / `Status` on transport failures
    pub async fn find_imdb_id(&self, title: &str, year: Option<&str>) -> Result<Option<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AddonError::MissingCredential("TMDB_API_KEY".to_string()))?;

        let mut request = self
            .client
            .get(format!("{}/search/multi", self.base_url))
            .header(ACCEPT, JSON)
            .query(&[("api_key", api_key), ("query", title)]);
        if let Some(year) = year {
            request = request.query(&[("year", year)]);
        }

        let search: SearchResponse = handle_response(request.send().await?).await?;
        let Some(first) = search.results.first() else {
            tracing::info!(%title, ?year, "no TMDB results");
            return Ok(None);
        };

        let details: Details = handle_response(
            self.client
                .get(format!(
                    "{}/{}/{}",
                    self.base_url,
                    first.detail_type(),
                    first.id
                ))
                .header(ACCEPT, JSON)
                .query(&[("api_key", api_key), ("append_to_response", "external_ids")])
                .send()
                .await?,
        )
        .await?;

        Ok(details
            .external_ids
            .and_then(|ids| ids.imdb_id)
            .filter(|id| !id.is_empty()))
    }
}

async fn handle_response<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AddonError::status(status.as_u16(), &body));
    }
    Ok(response.json().await?)
}
