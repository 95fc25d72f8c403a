//! Addon request handling
//!
//! Turns the four Stremio resources into provider calls, and rewrites
//! canonical catalog records so every identifier they carry points back
//! at this addon.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::cinemeta::CatalogClient;
use crate::config::Config;
use crate::error::{AddonError, Result, log_request_error};
use crate::id::CompositeId;
use crate::manifest::Manifest;
use crate::provider::Provider;
use crate::types::{MediaKind, MetaPreview, StreamLink};

/// Artwork used when the canonical catalog has nothing for a title
pub const FALLBACK_LOGO: &str =
    "https://raw.githubusercontent.com/MrMohebi/stremio-ir-providers/refs/heads/master/logo.png";

/// Extra catalog arguments (`search=...&skip=...`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogArgs {
    pub search: String,
    pub skip: usize,
}

impl CatalogArgs {
    /// Parses the URL-encoded extra-args path segment
    ///
    /// # Example
    /// ```
    /// use donyaye_core::CatalogArgs;
    /// let args = CatalogArgs::parse("search=true%20detective&skip=20");
    /// assert_eq!(args.search, "true detective");
    /// assert_eq!(args.skip, 20);
    /// ```
    pub fn parse(segment: &str) -> Self {
        let decoded = urlencoding::decode(segment)
            .map(|d| d.into_owned())
            .unwrap_or_else(|_| segment.to_string());

        let mut args = Self::default();
        for pair in decoded.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "search" => args.search = value.to_string(),
                "skip" => args.skip = value.parse().unwrap_or(0),
                _ => {}
            }
        }
        args
    }
}

/// The addon: one provider plus the external catalogs
pub struct Addon<P: Provider> {
    provider: P,
    catalog: CatalogClient,
    config: Arc<Config>,
}

impl<P: Provider> Addon<P> {
    pub fn new(provider: P, catalog: CatalogClient, config: Arc<Config>) -> Self {
        Self {
            provider,
            catalog,
            config,
        }
    }

    pub fn manifest(&self) -> Manifest {
        Manifest::new(&self.config, self.provider.name())
    }

    /// Decodes an identifier and checks it belongs to this provider
    fn decode(&self, id: &str) -> Result<CompositeId> {
        let decoded: CompositeId = id.parse()?;
        if decoded.provider() != self.provider.name() {
            return Err(AddonError::InvalidId(id.to_string()));
        }
        Ok(decoded)
    }

    /// Searches the provider for a catalog request
    ///
    /// Catalog ids not naming this provider, and blank searches, yield
    /// nothing. Items whose kind differs from `kind` are dropped, then the
    /// first `skip` of the rest; the site has a single result page, so any
    /// follow-up page comes back empty.
    pub async fn catalog(
        &self,
        kind: &str,
        catalog_id: &str,
        args: &CatalogArgs,
    ) -> Result<Vec<MetaPreview>> {
        if !catalog_id.contains(self.provider.name()) {
            tracing::debug!(%catalog_id, "catalog belongs to another provider");
            return Ok(Vec::new());
        }
        let query = args.search.trim();
        if query.is_empty() {
            tracing::debug!(%catalog_id, "empty catalog search");
            return Ok(Vec::new());
        }

        let search_kind = if catalog_id.contains("movies") {
            MediaKind::Movie
        } else {
            MediaKind::Series
        };

        let items = self.provider.search(query, search_kind).await;
        let mut previews = Vec::with_capacity(items.len());
        let matching = items
            .into_iter()
            .filter(|item| item.kind.as_str() == kind)
            .skip(args.skip);
        for item in matching {
            match CompositeId::new(self.provider.name(), &item.slug, None) {
                Ok(id) => previews.push(MetaPreview {
                    id: id.to_string(),
                    kind: item.kind,
                    name: item.name,
                    poster: item.poster,
                }),
                Err(e) => tracing::warn!(slug = %item.slug, error = %e, "skipping item"),
            }
        }
        Ok(previews)
    }

    /// Builds the metadata record for a title
    ///
    /// Resolves the canonical id from the provider page, fetches the
    /// canonical record and rewrites its ids. Falls back to a minimal
    /// record when only the provider page is available, and to `{}` when
    /// nothing is.
    pub async fn meta(&self, kind: MediaKind, id: &str) -> Result<Value> {
        let decoded = self.decode(id)?;
        let slug = decoded.slug();

        let page = self.provider.fetch_detail_page(kind, slug).await;
        let canonical_id = match &page {
            Some(page) => self.provider.resolve_external_id(page).await,
            None => None,
        };

        if let Some(canonical_id) = &canonical_id
            && let Some(mut record) = self.canonical_meta(kind, canonical_id).await
        {
            tracing::debug!(%canonical_id, "fetched canonical meta");
            match rewrite_meta(&mut record, kind, id, &decoded) {
                Ok(()) => return Ok(record),
                Err(e) => {
                    tracing::warn!(%canonical_id, error = %e, "could not rewrite canonical meta")
                }
            }
        }

        if page.is_some() {
            tracing::warn!(?canonical_id, %slug, "canonical meta unavailable, sending minimal meta");
            return Ok(fallback_meta(&self.config, kind, id, slug));
        }

        tracing::error!(%slug, "meta failed completely, sending empty response");
        Ok(json!({}))
    }

    async fn canonical_meta(&self, kind: MediaKind, canonical_id: &str) -> Option<Value> {
        match self.catalog.meta(kind, canonical_id).await {
            Ok(record) if record.get("meta").is_some_and(Value::is_object) => Some(record),
            Ok(_) => {
                tracing::warn!(%canonical_id, "canonical catalog returned no meta");
                None
            }
            Err(e) => {
                log_request_error(&format!("canonical meta for {canonical_id}"), &e);
                None
            }
        }
    }

    /// Resolves playable links for a movie or one episode
    pub async fn streams(&self, kind: MediaKind, id: &str) -> Result<Vec<StreamLink>> {
        let decoded = self.decode(id)?;
        let external_ref = decoded.external_ref().unwrap_or_default();

        let Some(page) = self.provider.fetch_detail_page(kind, decoded.slug()).await else {
            tracing::error!(slug = %decoded.slug(), "no page to extract streams from");
            return Ok(Vec::new());
        };

        Ok(self
            .provider
            .resolve_streams(kind, external_ref, &page, decoded.slug())
            .await)
    }

    /// Proxies the subtitle catalog for the identifier's canonical reference
    pub async fn subtitles(&self, kind: MediaKind, id: &str) -> Result<Value> {
        let decoded = self.decode(id)?;
        let Some(external_ref) = decoded.external_ref() else {
            tracing::debug!(%id, "identifier has no canonical reference");
            return Ok(empty_subtitles());
        };

        match self.catalog.subtitles(kind, external_ref).await {
            Ok(subtitles) => Ok(subtitles),
            Err(e) => {
                log_request_error(&format!("subtitles for {external_ref}"), &e);
                Ok(empty_subtitles())
            }
        }
    }
}

fn empty_subtitles() -> Value {
    json!({ "subtitles": [] })
}

/// Rewrites every identifier of a canonical record into this addon's namespace
///
/// Series keep the requested id and get each episode's id prefixed with
/// the title; episodes whose id cannot be wrapped are dropped. Movies get
/// their canonical id wrapped, mirrored into `behaviorHints.defaultVideoId`.
pub fn rewrite_meta(
    record: &mut Value,
    kind: MediaKind,
    requested_id: &str,
    title: &CompositeId,
) -> Result<()> {
    let Some(meta) = record.get_mut("meta").and_then(Value::as_object_mut) else {
        return Err(AddonError::ParseError("record has no meta object".to_string()));
    };

    match kind {
        MediaKind::Series => {
            if let Some(videos) = meta.get_mut("videos").and_then(Value::as_array_mut) {
                videos.retain_mut(|video| {
                    let rewritten = video
                        .get("id")
                        .and_then(Value::as_str)
                        .map(|video_id| title.with_external_ref(video_id));
                    match rewritten {
                        Some(Ok(rewritten)) => {
                            video["id"] = Value::String(rewritten.to_string());
                            true
                        }
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "dropping episode with unusable id");
                            false
                        }
                        None => true,
                    }
                });
            }
            meta.insert("id".to_string(), Value::String(requested_id.to_string()));
        }
        MediaKind::Movie => {
            let canonical_id = meta
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| AddonError::ParseError("meta has no id".to_string()))?;
            let rewritten = title.with_external_ref(canonical_id)?.to_string();

            meta.insert("id".to_string(), Value::String(rewritten.clone()));
            if let Some(hints) = meta.get_mut("behaviorHints").and_then(Value::as_object_mut) {
                hints.insert("defaultVideoId".to_string(), Value::String(rewritten));
            }
        }
    }
    Ok(())
}

/// Minimal record built from the slug alone
pub fn fallback_meta(config: &Config, kind: MediaKind, requested_id: &str, slug: &str) -> Value {
    let artwork = config.proxied(FALLBACK_LOGO);
    let mut meta = json!({
        "id": requested_id,
        "type": kind,
        "name": slug.replace('-', " "),
        "poster": artwork,
        "logo": artwork,
    });
    if kind == MediaKind::Series {
        meta["videos"] = json!([]);
    }
    json!({ "meta": meta })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_id() -> CompositeId {
        "ds_donyayeserial___true-detective___tt12345".parse().unwrap()
    }

    #[test]
    fn test_catalog_args_defaults() {
        assert_eq!(CatalogArgs::parse(""), CatalogArgs::default());
    }

    #[test]
    fn test_catalog_args_ignores_unknown_and_malformed() {
        let args = CatalogArgs::parse("genre=drama&search=dark&skip=abc&flag");
        assert_eq!(args.search, "dark");
        assert_eq!(args.skip, 0);
    }

    #[test]
    fn test_catalog_args_unicode() {
        let args = CatalogArgs::parse("search=%DA%A9%D8%A7%D8%B1");
        assert_eq!(args.search, "کار");
    }

    #[test]
    fn test_rewrite_series_meta() {
        let requested = "ds_donyayeserial___true-detective___tt12345";
        let mut record = json!({
            "meta": {
                "id": "tt12345",
                "type": "series",
                "videos": [
                    { "id": "tt12345:1:1", "season": 1, "episode": 1 },
                    { "id": "tt12345:1:2", "season": 1, "episode": 2 }
                ]
            }
        });

        rewrite_meta(&mut record, MediaKind::Series, requested, &title_id()).unwrap();

        assert_eq!(record["meta"]["id"], requested);
        assert_eq!(
            record["meta"]["videos"][0]["id"],
            "ds_donyayeserial___true-detective___tt12345:1:1"
        );
        assert_eq!(
            record["meta"]["videos"][1]["id"],
            "ds_donyayeserial___true-detective___tt12345:1:2"
        );
        assert_eq!(record["meta"]["videos"][1]["episode"], 2);
    }

    #[test]
    fn test_rewritten_ids_round_trip() {
        let mut record = json!({ "meta": { "id": "tt1", "videos": [{ "id": "tt1:2:3" }] } });
        rewrite_meta(&mut record, MediaKind::Series, "ds_donyayeserial___x___tt1", &title_id())
            .unwrap();

        let video_id = record["meta"]["videos"][0]["id"].as_str().unwrap();
        let decoded: CompositeId = video_id.parse().unwrap();
        assert_eq!(decoded.slug(), "true-detective");
        assert_eq!(decoded.external_ref(), Some("tt1:2:3"));
    }

    #[test]
    fn test_rewrite_movie_meta() {
        let title: CompositeId = "ds_donyayeserial___black-bag".parse().unwrap();
        let mut record = json!({
            "meta": {
                "id": "tt30400770",
                "type": "movie",
                "behaviorHints": { "defaultVideoId": "tt30400770", "hasScheduledVideos": false }
            }
        });

        rewrite_meta(&mut record, MediaKind::Movie, "ds_donyayeserial___black-bag", &title)
            .unwrap();

        let expected = "ds_donyayeserial___black-bag___tt30400770";
        assert_eq!(record["meta"]["id"], expected);
        assert_eq!(record["meta"]["behaviorHints"]["defaultVideoId"], expected);
        assert_eq!(record["meta"]["behaviorHints"]["hasScheduledVideos"], false);
    }

    #[test]
    fn test_rewrite_movie_without_hints() {
        let title: CompositeId = "ds_donyayeserial___black-bag".parse().unwrap();
        let mut record = json!({ "meta": { "id": "tt1" } });
        rewrite_meta(&mut record, MediaKind::Movie, "x", &title).unwrap();
        assert!(record["meta"].get("behaviorHints").is_none());
    }

    #[test]
    fn test_rewrite_series_drops_unwrappable_episode() {
        let mut record = json!({
            "meta": {
                "id": "tt12345",
                "videos": [
                    { "id": "tt12345:1:1" },
                    { "id": "tt12345___odd:1:2" },
                    { "id": "tt12345:1:3" }
                ]
            }
        });

        rewrite_meta(&mut record, MediaKind::Series, "x", &title_id()).unwrap();

        let videos = record["meta"]["videos"].as_array().unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0]["id"], "ds_donyayeserial___true-detective___tt12345:1:1");
        assert_eq!(videos[1]["id"], "ds_donyayeserial___true-detective___tt12345:1:3");
    }

    #[test]
    fn test_rewrite_movie_with_unwrappable_id_fails() {
        let title: CompositeId = "ds_donyayeserial___black-bag".parse().unwrap();
        let mut record = json!({ "meta": { "id": "tt1___x" } });
        let result = rewrite_meta(&mut record, MediaKind::Movie, "x", &title);
        assert!(matches!(result, Err(AddonError::InvalidId(_))));
    }

    #[test]
    fn test_rewrite_without_meta_fails() {
        let mut record = json!({});
        let result = rewrite_meta(&mut record, MediaKind::Movie, "x", &title_id());
        assert!(matches!(result, Err(AddonError::ParseError(_))));
    }

    #[test]
    fn test_fallback_series_meta() {
        let id = "ds_donyayeserial___true-detective___tt12345";
        let record = fallback_meta(&Config::default(), MediaKind::Series, id, "true-detective");
        assert_eq!(record["meta"]["id"], id);
        assert_eq!(record["meta"]["type"], "series");
        assert_eq!(record["meta"]["name"], "true detective");
        assert_eq!(record["meta"]["videos"], json!([]));
        assert_eq!(record["meta"]["poster"], FALLBACK_LOGO);
    }

    #[test]
    fn test_fallback_movie_meta_is_proxied() {
        let config = Config {
            proxy: Some(crate::config::ProxyConfig {
                url: "https://proxy.test".to_string(),
                path: "img".to_string(),
            }),
            ..Config::default()
        };
        let record = fallback_meta(&config, MediaKind::Movie, "id", "black-bag");
        assert!(record["meta"].get("videos").is_none());
        assert_eq!(
            record["meta"]["logo"],
            format!("https://proxy.test/img?url={}", FALLBACK_LOGO)
        );
    }
}
