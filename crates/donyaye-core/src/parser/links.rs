//! Download link parsers
//!
//! Movies list their files directly in the download box. Series list one
//! block per season, each holding links to quality-tier directories whose
//! listings contain the episode files.

use scraper::Html;

use super::{DOWNLOAD_BOX, download_box_selector, element_text, selector, strip_phrases};
use crate::error::{AddonError, Result};
use crate::types::{DirectoryCandidate, StreamLink};
use crate::url::is_video_url;

/// Boilerplate around movie link labels ("Download in quality", "Download")
const MOVIE_LINK_BOILERPLATE: [&str; 2] = ["دانلود با کیفیت", "دانلود"];

/// Boilerplate around directory link labels ("Download links for quality", "Click here")
const DIRECTORY_BOILERPLATE: [&str; 2] = ["لینک های دانلود کیفیت", "کلیک کنید"];

/// Season headings as written on the site, index = season number
const SEASON_LABELS: [&str; 13] = [
    "",
    "فصل اول",
    "فصل دوم",
    "فصل سوم",
    "فصل چهارم",
    "فصل پنجم",
    "فصل ششم",
    "فصل هفتم",
    "فصل هشتم",
    "فصل نهم",
    "فصل دهم",
    "فصل یازدهم",
    "فصل دوازدهم",
];

/// Heading text the site uses for a season
///
/// # Example
/// ```
/// use donyaye_core::parser::season_label;
/// assert_eq!(season_label(2), "فصل دوم");
/// assert_eq!(season_label(15), "فصل 15");
/// ```
pub fn season_label(season: u32) -> String {
    match SEASON_LABELS.get(season as usize) {
        Some(label) if season > 0 => label.to_string(),
        _ => format!("فصل {}", season),
    }
}

/// Parses the movie download box into stream links
///
/// Every anchor pointing at a video file becomes a link; its label is
/// cleaned and tagged `(DUB)` or `(SUB)` from the file's path.
///
/// # Errors
/// - `ElementNotFound` if the page has no download box
/// - `ParseError` if a selector fails to compile
pub fn parse_movie_links(html: &str) -> Result<Vec<StreamLink>> {
    let document = Html::parse_document(html);
    let box_selector = download_box_selector()?;
    let anchor_selector = selector("a")?;

    let download_box = document
        .select(&box_selector)
        .next()
        .ok_or_else(|| AddonError::ElementNotFound(DOWNLOAD_BOX.to_string()))?;

    let anchors: Vec<_> = download_box.select(&anchor_selector).collect();
    tracing::debug!(count = anchors.len(), "anchors in movie download box");

    let links = anchors
        .iter()
        .filter_map(|anchor| {
            let url = anchor.value().attr("href")?;
            if !is_video_url(url) {
                return None;
            }
            Some(StreamLink {
                url: url.to_string(),
                title: movie_link_title(url, &element_text(anchor)),
            })
        })
        .collect();

    Ok(links)
}

fn movie_link_title(url: &str, label: &str) -> String {
    let title = strip_phrases(label, &MOVIE_LINK_BOILERPLATE);
    if url.contains("/Dubbed/") {
        format!("(DUB) {}", title)
    } else if url.contains("/SoftSub/") {
        format!("(SUB) {}", title)
    } else {
        title
    }
}

/// Collects the quality-tier directories listed under one season heading
///
/// Scans the download box's `h3`, `p` and `hr` elements in document order.
/// The block starts at the first `h3` containing `label` and ends at the
/// next `h3` or `hr`. Inside the block, each paragraph's first link is
/// kept if it is absolute and not a video file itself.
///
/// # Errors
/// - `ElementNotFound` if the page has no download box
/// - `ParseError` if a selector fails to compile
pub fn parse_season_directories(html: &str, label: &str) -> Result<Vec<DirectoryCandidate>> {
    let document = Html::parse_document(html);
    let box_selector = download_box_selector()?;
    let block_selector = selector("h3, p, hr")?;
    let anchor_selector = selector("a")?;

    let download_box = document
        .select(&box_selector)
        .next()
        .ok_or_else(|| AddonError::ElementNotFound(DOWNLOAD_BOX.to_string()))?;

    let mut in_season = false;
    let mut directories = Vec::new();

    for element in download_box.select(&block_selector) {
        let tag = element.value().name();

        if tag == "h3" && element_text(&element).contains(label) {
            tracing::debug!(%label, "found season block");
            in_season = true;
            continue;
        }

        if in_season && (tag == "h3" || tag == "hr") {
            tracing::debug!(%label, "end of season block");
            break;
        }

        if in_season
            && tag == "p"
            && let Some(anchor) = element.select(&anchor_selector).next()
            && let Some(url) = anchor.value().attr("href")
            && url.starts_with("http")
            && !is_video_url(url)
        {
            let title = element_text(&anchor);
            tracing::debug!(%url, %title, "found directory link");
            directories.push(DirectoryCandidate {
                url: url.to_string(),
                title,
            });
        }
    }

    Ok(directories)
}

/// Lists the video files linked from a directory listing page
///
/// # Returns
/// Raw `href` values (often relative), in page order
pub fn parse_directory_listing(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let anchor_selector = selector("a[href]")?;

    Ok(document
        .select(&anchor_selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| is_video_url(href))
        .map(str::to_string)
        .collect())
}

/// Title of a resolved episode stream: `(S{season}E{episode}) - {quality}`
pub fn episode_stream_title(season: u32, episode: u32, directory_title: &str) -> String {
    format!(
        "(S{}E{}) - {}",
        season,
        episode,
        strip_phrases(directory_title, &DIRECTORY_BOILERPLATE)
    )
}
