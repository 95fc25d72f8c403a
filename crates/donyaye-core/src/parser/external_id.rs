//! Canonical (IMDb) identifier extraction from a title page
//!
//! The page either links to IMDb directly, or only gives a title and
//! release year that the caller can look up in a title-search service.

use regex::Regex;
use scraper::Html;

use super::search::TITLE_BOILERPLATE;
use super::{element_text, selector, strip_phrases};
use crate::error::{AddonError, Result};

/// Title value the site uses when it has no real name
const UNKNOWN_TITLE: &str = "Unknown";

/// What a title page tells us about its canonical identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalIdHint {
    /// The page links to the canonical database
    Found(String),
    /// No link; the cleaned title (and year, if shown) can be searched for
    Search { title: String, year: Option<String> },
    /// Neither a link nor a usable title
    Unresolvable(String),
}

/// Trailing year plus whatever release tags follow it
const TRAILING_YEAR: &str = r"[(.\s]\d{4}\)?.*$";

/// Inspects a title page for its canonical identifier
///
/// # Arguments
/// * `html` - Raw HTML of the title's detail page
///
/// # Returns
/// [`ExternalIdHint::Found`] with the `tt…` id when the page links to
/// IMDb; otherwise a search hint, or `Unresolvable` with the reason
///
/// # Errors
/// Returns `ParseError` only if a selector fails to compile
pub fn extract_external_id(html: &str) -> Result<ExternalIdHint> {
    let document = Html::parse_document(html);

    let imdb_selector = selector(r#"a.fm-box-imdb[href*="imdb.com/title/"]"#)?;
    let imdb_id = Regex::new(r"tt\d+")
        .map_err(|e| AddonError::ParseError(format!("Invalid regex: {e}")))?;
    if let Some(href) = document
        .select(&imdb_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        && let Some(found) = imdb_id.find(href)
    {
        tracing::debug!(imdb_id = found.as_str(), "found imdb id on page");
        return Ok(ExternalIdHint::Found(found.as_str().to_string()));
    }

    tracing::warn!("no imdb link on page, falling back to title search");

    let heading_selector = selector("h1")?;
    let Some(heading) = document.select(&heading_selector).next() else {
        return Ok(ExternalIdHint::Unresolvable(
            "page has no <h1> title".to_string(),
        ));
    };
    let title = strip_phrases(&element_text(&heading), &TITLE_BOILERPLATE);

    let year_selector = selector(r#"span.pr-item a[href*="/release/"]"#)?;
    let year = document
        .select(&year_selector)
        .next()
        .map(|a| element_text(&a).trim().to_string())
        .filter(|y| !y.is_empty());

    let title = clean_title(&title);
    if title.is_empty() || title == UNKNOWN_TITLE {
        return Ok(ExternalIdHint::Unresolvable(
            "could not parse a valid title from <h1>".to_string(),
        ));
    }

    tracing::debug!(%title, ?year, "prepared title search");
    Ok(ExternalIdHint::Search { title, year })
}

/// Strips a trailing year (and everything after it) and turns dots into spaces
///
/// # Example
/// ```
/// use donyaye_core::parser::external_id::clean_title;
/// assert_eq!(clean_title("Black.Bag.2025.1080p.WEB-DL"), "Black Bag");
/// assert_eq!(clean_title("True Detective (2014)"), "True Detective");
/// ```
pub fn clean_title(title: &str) -> String {
    let without_year = match Regex::new(TRAILING_YEAR) {
        Ok(re) => re.replace(title, "").into_owned(),
        Err(_) => title.to_string(),
    };
    without_year.replace('.', " ").trim().to_string()
}
