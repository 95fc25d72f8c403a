//! Composite identifier codec
//!
//! Identifiers exchanged with the addon host have the shape
//! `{prefix}{provider}{sep}{slug}[{sep}{external_ref}]`, for example
//! `ds_donyayeserial___true-detective___tt2356777:1:3`.

use std::fmt;
use std::str::FromStr;

use crate::error::{AddonError, Result};

/// Prefix shared by every identifier this addon emits
pub const ADDON_PREFIX: &str = "ds_";

/// Token joining the identifier segments
pub const ID_SEPARATOR: &str = "___";

/// Decoded composite identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeId {
    provider: String,
    slug: String,
    external_ref: Option<String>,
}

impl CompositeId {
    /// Builds an identifier, rejecting components that would not decode back
    ///
    /// # Errors
    /// `InvalidId` if any component contains the separator, or if the
    /// provider or slug is empty
    pub fn new(provider: &str, slug: &str, external_ref: Option<&str>) -> Result<Self> {
        if provider.is_empty() || slug.is_empty() {
            return Err(AddonError::InvalidId(
                "provider and slug cannot be empty".to_string(),
            ));
        }
        for part in [provider, slug].into_iter().chain(external_ref) {
            if part.contains(ID_SEPARATOR) {
                return Err(AddonError::InvalidId(format!(
                    "component contains separator: {part}"
                )));
            }
        }
        if external_ref.is_some_and(str::is_empty) {
            return Err(AddonError::InvalidId(
                "external reference cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            provider: provider.to_string(),
            slug: slug.to_string(),
            external_ref: external_ref.map(str::to_string),
        })
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Canonical-catalog reference, absent on catalog-level identifiers
    pub fn external_ref(&self) -> Option<&str> {
        self.external_ref.as_deref()
    }

    /// Same title, pointing at another canonical reference
    pub fn with_external_ref(&self, external_ref: &str) -> Result<Self> {
        Self::new(&self.provider, &self.slug, Some(external_ref))
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ADDON_PREFIX}{}{ID_SEPARATOR}{}", self.provider, self.slug)?;
        if let Some(external_ref) = &self.external_ref {
            write!(f, "{ID_SEPARATOR}{external_ref}")?;
        }
        Ok(())
    }
}

impl FromStr for CompositeId {
    type Err = AddonError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AddonError::InvalidId(s.to_string());

        let rest = s.strip_prefix(ADDON_PREFIX).ok_or_else(invalid)?;
        let parts: Vec<&str> = rest.split(ID_SEPARATOR).collect();

        let decoded = match parts.as_slice() {
            [provider, slug] => Self::new(provider, slug, None),
            [provider, slug, external_ref] => Self::new(provider, slug, Some(external_ref)),
            _ => return Err(invalid()),
        };
        decoded.map_err(|_| invalid())
    }
}

/// Episode reference carried by series stream identifiers (`tt123:1:2`)
///
/// Season and episode are `None` when missing or not numeric; callers
/// treat that as "no match" rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRef {
    pub canonical_id: String,
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

impl EpisodeRef {
    pub fn parse(external_ref: &str) -> Self {
        let mut parts = external_ref.split(':');
        let canonical_id = parts.next().unwrap_or_default().to_string();
        let season = parts.next().and_then(|s| s.trim().parse().ok());
        let episode = parts.next().and_then(|e| e.trim().parse().ok());

        Self {
            canonical_id,
            season,
            episode,
        }
    }

    /// Season and episode, only when both parsed
    pub fn numbers(&self) -> Option<(u32, u32)> {
        self.season.zip(self.episode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_catalog_id() {
        let id = CompositeId::new("donyayeserial", "true-detective", None).unwrap();
        assert_eq!(id.to_string(), "ds_donyayeserial___true-detective");
    }

    #[test]
    fn test_encode_episode_id() {
        let id =
            CompositeId::new("donyayeserial", "true-detective", Some("tt2356777:1:3")).unwrap();
        assert_eq!(
            id.to_string(),
            "ds_donyayeserial___true-detective___tt2356777:1:3"
        );
    }

    #[test]
    fn test_decode_three_segments() {
        let id: CompositeId = "ds_donyayeserial___true-detective___tt12345".parse().unwrap();
        assert_eq!(id.provider(), "donyayeserial");
        assert_eq!(id.slug(), "true-detective");
        assert_eq!(id.external_ref(), Some("tt12345"));
    }

    #[test]
    fn test_decode_two_segments() {
        let id: CompositeId = "ds_donyayeserial___black-bag".parse().unwrap();
        assert_eq!(id.slug(), "black-bag");
        assert_eq!(id.external_ref(), None);
    }

    #[test]
    fn test_decode_rejects_wrong_prefix() {
        let result = "tt12345".parse::<CompositeId>();
        assert!(matches!(result, Err(AddonError::InvalidId(_))));
    }

    #[test]
    fn test_decode_rejects_extra_segments() {
        let result = "ds_donyayeserial___a___b___c".parse::<CompositeId>();
        assert!(matches!(result, Err(AddonError::InvalidId(_))));
    }

    #[test]
    fn test_decode_rejects_empty_slug() {
        let result = "ds_donyayeserial______tt1".parse::<CompositeId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_rejects_separator_in_slug() {
        let result = CompositeId::new("donyayeserial", "bad___slug", None);
        assert!(matches!(result, Err(AddonError::InvalidId(_))));
    }

    #[test]
    fn test_encode_rejects_separator_in_ref() {
        let result = CompositeId::new("donyayeserial", "slug", Some("tt1___x"));
        assert!(result.is_err());
    }

    #[test]
    fn test_with_external_ref() {
        let id: CompositeId = "ds_donyayeserial___true-detective".parse().unwrap();
        let episode = id.with_external_ref("tt12345:2:4").unwrap();
        assert_eq!(
            episode.to_string(),
            "ds_donyayeserial___true-detective___tt12345:2:4"
        );
    }

    #[test]
    fn test_episode_ref_parse() {
        let episode = EpisodeRef::parse("tt2356777:3:10");
        assert_eq!(episode.canonical_id, "tt2356777");
        assert_eq!(episode.numbers(), Some((3, 10)));
    }

    #[test]
    fn test_episode_ref_missing_numbers() {
        let episode = EpisodeRef::parse("tt2356777");
        assert_eq!(episode.canonical_id, "tt2356777");
        assert_eq!(episode.numbers(), None);
    }

    #[test]
    fn test_episode_ref_non_numeric() {
        let episode = EpisodeRef::parse("tt1:one:2");
        assert_eq!(episode.season, None);
        assert_eq!(episode.episode, Some(2));
        assert_eq!(episode.numbers(), None);
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            slug in "[a-z0-9][a-z0-9-]{0,40}",
            external_ref in proptest::option::of("tt[0-9]{1,9}(:[0-9]{1,2}:[0-9]{1,3})?"),
        ) {
            let id = CompositeId::new("donyayeserial", &slug, external_ref.as_deref()).unwrap();
            let decoded: CompositeId = id.to_string().parse().unwrap();
            prop_assert_eq!(decoded.slug(), slug.as_str());
            prop_assert_eq!(decoded.external_ref(), external_ref.as_deref());
            prop_assert_eq!(decoded, id);
        }

        #[test]
        fn prop_decode_never_panics(input in ".{0,80}") {
            let _ = input.parse::<CompositeId>();
        }
    }
}
