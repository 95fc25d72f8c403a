//! Donyaye Serial provider
//!
//! Combines the site client, the HTML parsers, the episode matcher and
//! the TMDB fallback into the [`Provider`] operations.

use crate::client::{SiteClient, build_http_client};
use crate::config::Config;
use crate::error::{Result, log_request_error};
use crate::id::EpisodeRef;
use crate::matcher::find_episode_file;
use crate::parser::{
    ExternalIdHint, episode_stream_title, extract_external_id, parse_directory_listing,
    parse_movie_links, parse_search_results, parse_season_directories, season_label,
};
use crate::provider::Provider;
use crate::tmdb::TmdbClient;
use crate::types::{DirectoryCandidate, MediaKind, SourceItem, StreamLink};
use crate::url::{
    build_detail_url, build_directory_referer, build_root_url, build_search_url, resolve_file_url,
};

/// Provider for donyayeserial.com
///
/// Holds no per-request state; every call re-fetches what it needs.
#[derive(Clone)]
pub struct DonyayeSerial {
    client: SiteClient,
    tmdb: TmdbClient,
}

impl DonyayeSerial {
    /// Namespace token of this provider
    pub const NAME: &'static str = "donyayeserial";

    /// Create the provider with its own HTTP client
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_client(build_http_client(config)?, config))
    }

    /// Create the provider sharing an existing HTTP client
    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client: SiteClient::with_client(client.clone(), config),
            tmdb: TmdbClient::new(client, config),
        }
    }

    fn root_url(&self) -> String {
        build_root_url(self.client.base_url())
    }

    /// Movie links from a detail page; empty (and logged) when none found
    pub fn movie_links(&self, page: &str) -> Vec<StreamLink> {
        let links = match parse_movie_links(page) {
            Ok(links) => links,
            Err(e) => {
                tracing::error!(error = %e, "could not parse movie download box");
                return Vec::new();
            }
        };

        if links.is_empty() {
            tracing::warn!("movie download box has no .mkv/.mp4 links");
        }
        links
    }

    /// Resolves one episode's links by walking the season's quality directories
    ///
    /// Directories are fetched one after another; a directory that fails
    /// or lacks the episode is logged and skipped.
    pub async fn series_links(&self, page: &str, external_ref: &str, slug: &str) -> Vec<StreamLink> {
        let episode_ref = EpisodeRef::parse(external_ref);
        let Some((season, episode)) = episode_ref.numbers() else {
            tracing::warn!(%external_ref, "episode reference has no season/episode numbers");
            return Vec::new();
        };
        tracing::debug!(season, episode, %slug, "resolving series links");

        let label = season_label(season);
        let directories = match parse_season_directories(page, &label) {
            Ok(directories) => directories,
            Err(e) => {
                tracing::error!(error = %e, "could not parse series download box");
                return Vec::new();
            }
        };

        tracing::debug!(count = directories.len(), season, "found quality directories");
        if directories.is_empty() {
            tracing::warn!(%label, "no directory links found for season");
        }

        let referer = build_directory_referer(self.client.base_url(), Some(slug));
        tracing::debug!(%referer, "using directory referer");

        let mut streams = Vec::new();
        for directory in &directories {
            if let Some(stream) = self
                .episode_from_directory(directory, season, episode, &referer)
                .await
            {
                tracing::debug!(url = %stream.url, "found episode stream");
                streams.push(stream);
            }
        }

        if streams.is_empty() {
            tracing::warn!(season, episode, "no streams found for episode");
        }
        streams
    }

    async fn episode_from_directory(
        &self,
        directory: &DirectoryCandidate,
        season: u32,
        episode: u32,
        referer: &str,
    ) -> Option<StreamLink> {
        tracing::debug!(url = %directory.url, "fetching episode list");

        let listing = match self.client.fetch_directory(&directory.url, referer).await {
            Ok(listing) => listing,
            Err(e) => {
                log_request_error(&format!("directory {}", directory.url), &e);
                return None;
            }
        };

        let files = match parse_directory_listing(&listing) {
            Ok(files) => files,
            Err(e) => {
                tracing::error!(url = %directory.url, error = %e, "could not parse directory listing");
                return None;
            }
        };
        if files.is_empty() {
            tracing::warn!(url = %directory.url, "no video files in directory");
            return None;
        }

        let Some(file) = find_episode_file(season, episode, files.as_slice()) else {
            tracing::warn!(url = %directory.url, episode, "episode not found in directory");
            return None;
        };

        Some(StreamLink {
            url: resolve_file_url(&directory.url, file),
            title: episode_stream_title(season, episode, &directory.title),
        })
    }
}

impl Provider for DonyayeSerial {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn search(&self, query: &str, kind: MediaKind) -> Vec<SourceItem> {
        let url = build_search_url(self.client.base_url(), query, kind);
        tracing::debug!(%query, %kind, %url, "searching");

        let html = match self.client.fetch(&url, &self.root_url()).await {
            Ok(html) => html,
            Err(e) => {
                log_request_error("search", &e);
                return Vec::new();
            }
        };

        match parse_search_results(&html, kind) {
            Ok(items) => {
                if items.is_empty() {
                    tracing::warn!(%query, %kind, "search found no results");
                }
                items
            }
            Err(e) => {
                tracing::error!(error = %e, "could not parse search results");
                Vec::new()
            }
        }
    }

    async fn fetch_detail_page(&self, kind: MediaKind, slug: &str) -> Option<String> {
        let url = build_detail_url(self.client.base_url(), kind, slug);
        tracing::debug!(%url, "fetching detail page");

        match self.client.fetch(&url, &self.root_url()).await {
            Ok(page) => Some(page),
            Err(e) => {
                log_request_error(&format!("detail page for {slug}"), &e);
                None
            }
        }
    }

    async fn resolve_external_id(&self, page: &str) -> Option<String> {
        let hint = match extract_external_id(page) {
            Ok(hint) => hint,
            Err(e) => {
                tracing::error!(error = %e, "could not inspect page for imdb id");
                return None;
            }
        };

        let (title, year) = match hint {
            ExternalIdHint::Found(id) => return Some(id),
            ExternalIdHint::Unresolvable(reason) => {
                tracing::error!(%reason, "imdb id fallback failed");
                return None;
            }
            ExternalIdHint::Search { title, year } => (title, year),
        };

        if !self.tmdb.is_configured() {
            tracing::error!("imdb id fallback failed: TMDB_API_KEY is not configured");
            return None;
        }

        match self.tmdb.find_imdb_id(&title, year.as_deref()).await {
            Ok(Some(id)) => {
                tracing::debug!(imdb_id = %id, "found imdb id from TMDB");
                Some(id)
            }
            Ok(None) => {
                tracing::error!(%title, "imdb id could not be found by any method");
                None
            }
            Err(e) => {
                log_request_error("TMDB search", &e);
                None
            }
        }
    }

    async fn resolve_streams(
        &self,
        kind: MediaKind,
        external_ref: &str,
        page: &str,
        slug: &str,
    ) -> Vec<StreamLink> {
        match kind {
            MediaKind::Movie => self.movie_links(page),
            MediaKind::Series => self.series_links(page, external_ref, slug).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = DonyayeSerial::new(&Config::default());
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().name(), "donyayeserial");
    }

    #[test]
    fn test_movie_links_without_box_is_empty() {
        let provider = DonyayeSerial::new(&Config::default()).unwrap();
        assert!(provider.movie_links("<html></html>").is_empty());
    }

    #[tokio::test]
    async fn test_series_links_with_invalid_ref_is_empty() {
        let provider = DonyayeSerial::new(&Config::default()).unwrap();
        let links = provider.series_links("<html></html>", "tt123", "slug").await;
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_external_id_from_page_needs_no_network() {
        let provider = DonyayeSerial::new(&Config::default()).unwrap();
        let page = r#"<a class="fm-box-imdb" href="https://www.imdb.com/title/tt2356777/">IMDb</a>"#;
        assert_eq!(
            provider.resolve_external_id(page).await,
            Some("tt2356777".to_string())
        );
    }

    #[tokio::test]
    async fn test_external_id_without_credential() {
        let provider = DonyayeSerial::new(&Config::default()).unwrap();
        let page = "<h1>دانلود سریال Severance</h1>";
        assert_eq!(provider.resolve_external_id(page).await, None);
    }
}
