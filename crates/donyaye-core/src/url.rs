//! URL helper functions for the provider site
//!
//! Provides functions for building search, detail and referer URLs and
//! for recognising and resolving video file links.

use url::Url;

use crate::types::MediaKind;

/// Stand-in origin for resolving relative links whose host does not matter
const RELATIVE_BASE: &str = "http://relative.invalid/";

/// File extensions the addon treats as playable video
pub const VIDEO_EXTENSIONS: [&str; 2] = [".mkv", ".mp4"];

/// Normalizes a configured host into a base URL without trailing slash
///
/// # Example
/// ```
/// use donyaye_core::url::normalize_base_url;
/// assert_eq!(normalize_base_url("donyayeserial.com"), "https://donyayeserial.com");
/// assert_eq!(normalize_base_url("http://127.0.0.1:8080/"), "http://127.0.0.1:8080");
/// ```
pub fn normalize_base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Builds the site root URL used as the default referer
pub fn build_root_url(base: &str) -> String {
    format!("{}/", base)
}

/// Builds the advanced search URL for a query
///
/// Spaces are sent as `+`, everything else percent-encoded.
///
/// # Example
/// ```
/// use donyaye_core::MediaKind;
/// use donyaye_core::url::build_search_url;
/// let url = build_search_url("https://site.test", "true detective", MediaKind::Series);
/// assert_eq!(url, "https://site.test/?s=true+detective&search_type=advanced&post_type=series");
/// ```
pub fn build_search_url(base: &str, query: &str, kind: MediaKind) -> String {
    let encoded = urlencoding::encode(query).replace("%20", "+");
    format!(
        "{}/?s={}&search_type=advanced&post_type={}",
        base,
        encoded,
        kind.post_type()
    )
}

/// Builds the detail page URL of a title
///
/// Series live under `/series/{slug}/`, movies directly under `/{slug}/`.
pub fn build_detail_url(base: &str, kind: MediaKind, slug: &str) -> String {
    match kind {
        MediaKind::Series => format!("{}/series/{}/", base, slug),
        MediaKind::Movie => format!("{}/{}/", base, slug),
    }
}

/// Referer sent when fetching a series' directory listings
///
/// The upstream only serves directory listings to requests that appear
/// to come from the series page itself.
pub fn build_directory_referer(base: &str, slug: Option<&str>) -> String {
    match slug.filter(|s| !s.is_empty()) {
        Some(slug) => build_detail_url(base, MediaKind::Series, slug),
        None => build_root_url(base),
    }
}

/// Extracts the slug (last non-empty path segment) from a title link
///
/// # Example
/// ```
/// use donyaye_core::url::extract_slug;
/// assert_eq!(extract_slug("https://site.test/series/true-detective/"), Some("true-detective".to_string()));
/// assert_eq!(extract_slug("/"), None);
/// ```
pub fn extract_slug(href: &str) -> Option<String> {
    let url = Url::parse(href)
        .or_else(|_| Url::parse(RELATIVE_BASE).and_then(|base| base.join(href)))
        .ok()?;

    let segment = url.path_segments()?.filter(|s| !s.is_empty()).next_back()?;
    let slug = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    Some(slug)
}

/// Checks whether a link points directly at a video file
pub fn is_video_url(href: &str) -> bool {
    let path = href.split(['?', '#']).next().unwrap_or(href).to_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Resolves a file link found in a directory listing against that directory
///
/// Absolute links are returned as-is; relative ones are joined to the
/// directory URL (treated as a folder even without a trailing slash).
pub fn resolve_file_url(directory: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    let folder = if directory.ends_with('/') {
        directory.to_string()
    } else {
        format!("{}/", directory)
    };

    match Url::parse(&folder).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}{}", folder, href.trim_start_matches('/')),
    }
}
