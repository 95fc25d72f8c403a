//! Core data types for the addon
//!
//! Contains the data structures passed between the parsers, the provider
//! and the HTTP layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of media the addon serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }

    /// Value of the site's `post_type` search parameter
    pub fn post_type(&self) -> &'static str {
        match self {
            MediaKind::Movie => "post",
            MediaKind::Series => "series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = crate::AddonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaKind::Movie),
            "series" => Ok(MediaKind::Series),
            other => Err(crate::AddonError::ParseError(format!(
                "unknown media type: {other}"
            ))),
        }
    }
}

/// One title found on the provider's search results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    /// Display title with the site's download boilerplate removed
    pub name: String,

    /// Poster image URL, empty when the card has none
    pub poster: String,

    /// Movie or series, derived from the search type
    #[serde(rename = "type")]
    pub kind: MediaKind,

    /// Last path segment of the title's page URL (e.g. "true-detective")
    pub slug: String,
}

/// Catalog entry as sent to the addon host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaPreview {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub name: String,
    pub poster: String,
}

/// A playable link returned from the stream endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamLink {
    pub url: String,
    pub title: String,
}

/// Quality-tier folder discovered inside a season's download block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryCandidate {
    pub url: String,
    pub title: String,
}
