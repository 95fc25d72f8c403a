//! HTTP client for the provider site
//!
//! Every request carries the same browser-emulation headers plus a
//! request-specific `Referer`; the site serves degraded pages (or
//! refuses directory listings) without them.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::config::Config;
use crate::error::{AddonError, Result};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";
const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,fa;q=0.8";
const ACCEPT_ENCODING: &str = "gzip, deflate, br";

/// Fixed header set sent with every page request
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers.insert(
        header::ACCEPT_ENCODING,
        HeaderValue::from_static(ACCEPT_ENCODING),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// Builds the shared reqwest client
///
/// Connections go out over IPv4 only; the site's IPv6 endpoints are
/// unreliable.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .user_agent(USER_AGENT)
        .default_headers(browser_headers())
        .local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
        .build()
        .map_err(AddonError::HttpError)
}

/// Page fetcher for the provider site
///
/// Holds no state beyond the connection pool reqwest keeps internally.
#[derive(Clone)]
pub struct SiteClient {
    client: reqwest::Client,
    base_url: String,
    directory_timeout: Duration,
}

impl SiteClient {
    /// Create a client from the addon configuration
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_client(build_http_client(config)?, config))
    }

    /// Create a client reusing an existing reqwest client
    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.site_base_url.clone(),
            directory_timeout: config.directory_timeout,
        }
    }

    /// Base URL of the provider site (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a page with the given referer
    ///
    /// # Returns
    /// The response body
    ///
    /// # Errors
    /// - `HttpError` - transport failure or timeout
    /// - `Status` - non-2xx response, with a body snippet
    pub async fn fetch(&self, url: &str, referer: &str) -> Result<String> {
        self.send(self.client.get(url), referer).await
    }

    /// Fetch a directory listing, bounded by the directory timeout
    pub async fn fetch_directory(&self, url: &str, referer: &str) -> Result<String> {
        let request = self.client.get(url).timeout(self.directory_timeout);
        self.send(request, referer).await
    }

    async fn send(&self, request: reqwest::RequestBuilder, referer: &str) -> Result<String> {
        let response = request
            .header(header::REFERER, referer)
            .send()
            .await
            .map_err(AddonError::HttpError)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AddonError::status(status.as_u16(), &body));
        }

        response.text().await.map_err(AddonError::HttpError)
    }
}
