//! Search results parser
//!
//! Parses the site's advanced-search page into [`SourceItem`]s.

use scraper::{ElementRef, Html, Selector};

use super::{element_text, selector, strip_phrases};
use crate::error::Result;
use crate::types::{MediaKind, SourceItem};
use crate::url::extract_slug;

/// Boilerplate the site puts in front of every title ("Download Movie", "Download Series")
pub const TITLE_BOILERPLATE: [&str; 2] = ["دانلود فیلم", "دانلود سریال"];

/// Parses search results HTML and returns the found titles in page order
///
/// # Arguments
/// * `html` - Raw HTML string from the search results page
/// * `kind` - Kind the search was made for; every item inherits it
///
/// # Returns
/// Vector of [`SourceItem`], empty if the page has no result cards
///
/// # Errors
/// Returns `ParseError` only if a selector fails to compile
pub fn parse_search_results(html: &str, kind: MediaKind) -> Result<Vec<SourceItem>> {
    let document = Html::parse_document(html);
    let card_selector = selector("article.postItems")?;
    let title_selector = selector(".post-title h2 a")?;
    let poster_selector = selector(".imgWrapper img")?;

    let items: Vec<SourceItem> = document
        .select(&card_selector)
        .filter_map(|card| parse_result_card(&card, kind, &title_selector, &poster_selector))
        .collect();

    tracing::debug!(count = items.len(), %kind, "parsed search results");
    Ok(items)
}

/// Parses a single result card, skipping cards without a usable link
fn parse_result_card(
    card: &ElementRef,
    kind: MediaKind,
    title_selector: &Selector,
    poster_selector: &Selector,
) -> Option<SourceItem> {
    let title_link = card.select(title_selector).next()?;
    let href = title_link.value().attr("href")?;

    let raw_title = title_link
        .value()
        .attr("title")
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| element_text(&title_link));
    let name = strip_phrases(&raw_title, &TITLE_BOILERPLATE);

    let slug = extract_slug(href)?;

    let poster = card
        .select(poster_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .unwrap_or_default()
        .to_string();

    Some(SourceItem {
        name,
        poster,
        kind,
        slug,
    })
}
