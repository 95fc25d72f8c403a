//! HTML parsers for the provider site
//!
//! Parsers are synchronous and take raw markup, so callers can drop the
//! parsed document before awaiting anything.

pub mod external_id;
pub mod links;
pub mod search;

use scraper::{ElementRef, Selector};

use crate::error::{AddonError, Result};

pub use external_id::{ExternalIdHint, extract_external_id};
pub use links::{
    episode_stream_title, parse_directory_listing, parse_movie_links, parse_season_directories,
    season_label,
};
pub use search::parse_search_results;

/// Container holding every download link on a title page
pub const DOWNLOAD_BOX: &str = ".dl-box-alert.--notif";

/// [`DOWNLOAD_BOX`] written with an attribute match for the `--notif` class
const DOWNLOAD_BOX_SELECTOR: &str = r#".dl-box-alert[class~="--notif"]"#;

/// Compiles a CSS selector, mapping failures to `ParseError`
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| AddonError::ParseError(format!("Invalid selector {css}: {e:?}")))
}

/// Compiles the download box selector
pub(crate) fn download_box_selector() -> Result<Selector> {
    selector(DOWNLOAD_BOX_SELECTOR)
}

/// Concatenated text of an element
pub(crate) fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

/// Removes the first occurrence of each phrase, then trims
pub(crate) fn strip_phrases(text: &str, phrases: &[&str]) -> String {
    let mut cleaned = text.to_string();
    for phrase in phrases {
        cleaned = cleaned.replacen(phrase, "", 1);
    }
    cleaned.trim().to_string()
}
