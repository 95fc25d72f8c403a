//! Process configuration
//!
//! Built once at startup from the environment and shared by reference
//! with every component.

use std::time::Duration;

use crate::url::normalize_base_url;

const DEFAULT_SITE_HOST: &str = "donyayeserial.com";
const DEFAULT_PORT: u16 = 7001;
const CINEMETA_URL: &str = "https://v3-cinemeta.strem.io";
const SUBTITLES_URL: &str = "https://opensubtitles-v3.strem.io";
const TMDB_URL: &str = "https://api.themoviedb.org/3";

/// URL-rewriting proxy wrapped around fallback artwork
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub url: String,
    pub path: String,
}

/// Immutable addon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider site base URL, scheme included, no trailing slash
    pub site_base_url: String,
    /// Default tracing filter directive
    pub log_level: String,
    /// Marks the manifest and catalogs as a development build
    pub dev_mode: bool,
    /// Credential for the title-search fallback
    pub tmdb_api_key: Option<String>,
    pub proxy: Option<ProxyConfig>,
    pub port: u16,
    pub cinemeta_url: String,
    pub subtitles_url: String,
    pub tmdb_url: String,
    /// Timeout for every outbound request
    pub request_timeout: Duration,
    /// Timeout for a single directory-listing fetch
    pub directory_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_base_url: normalize_base_url(DEFAULT_SITE_HOST),
            log_level: "info".to_string(),
            dev_mode: false,
            tmdb_api_key: None,
            proxy: None,
            port: DEFAULT_PORT,
            cinemeta_url: CINEMETA_URL.to_string(),
            subtitles_url: SUBTITLES_URL.to_string(),
            tmdb_url: TMDB_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            directory_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Reads the configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let proxy = if get("PROXY_ENABLE").as_deref() == Some("true") {
            Some(ProxyConfig {
                url: get("PROXY_URL").unwrap_or_default(),
                path: get("PROXY_PATH").unwrap_or_default(),
            })
        } else {
            None
        };

        let port = match get("PORT").map(|p| p.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(e)) => {
                tracing::warn!(error = %e, default = DEFAULT_PORT, "invalid PORT, using default");
                DEFAULT_PORT
            }
            None => DEFAULT_PORT,
        };

        Self {
            site_base_url: get("DONYESERIAL_BASEURL")
                .map(|host| normalize_base_url(&host))
                .unwrap_or(defaults.site_base_url),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            dev_mode: get("DEV_MODE").as_deref() == Some("true"),
            tmdb_api_key: get("TMDB_API_KEY"),
            proxy,
            port,
            ..defaults
        }
    }

    /// Wraps a URL with the configured proxy, if any
    ///
    /// # Example
    /// ```
    /// use donyaye_core::Config;
    /// let config = Config::default();
    /// assert_eq!(config.proxied("https://a.test/logo.png"), "https://a.test/logo.png");
    /// ```
    pub fn proxied(&self, url: &str) -> String {
        match &self.proxy {
            Some(proxy) => format!("{}/{}?url={}", proxy.url, proxy.path, url),
            None => url.to_string(),
        }
    }

    /// Addon display name, suffixed in development mode
    pub fn display_name(&self) -> String {
        if self.dev_mode {
            "Donyaye Serial - DEV".to_string()
        } else {
            "Donyaye Serial".to_string()
        }
    }
}
