//! Stremio resource handlers
//!
//! Every handler answers 200: failures are logged and replaced by the
//! resource's empty body.

use axum::{
    Json,
    extract::{Path, State},
};
use donyaye_core::{CatalogArgs, Manifest, MediaKind, MetaPreview, StreamLink};
use serde::Serialize;
use serde_json::{Value, json};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub metas: Vec<MetaPreview>,
}

#[derive(Debug, Serialize)]
pub struct StreamsResponse {
    pub streams: Vec<StreamLink>,
}

/// Strips the `.json` suffix Stremio appends to the last path segment
fn strip_json(segment: &str) -> &str {
    segment.strip_suffix(".json").unwrap_or(segment)
}

fn parse_kind(kind: &str) -> Option<MediaKind> {
    match kind.parse() {
        Ok(kind) => Some(kind),
        Err(e) => {
            tracing::warn!(%kind, error = %e, "unsupported type");
            None
        }
    }
}

pub async fn manifest(State(state): State<AppState>) -> Json<Manifest> {
    Json(state.addon.manifest())
}

/// `/catalog/{type}/{id}.json`, a catalog request without extra args
pub async fn catalog(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Json<CatalogResponse> {
    search_catalog(&state, &kind, strip_json(&id), &CatalogArgs::default()).await
}

/// `/catalog/{type}/{id}/{extra}.json`
pub async fn catalog_with_extra(
    State(state): State<AppState>,
    Path((kind, id, extra)): Path<(String, String, String)>,
) -> Json<CatalogResponse> {
    let args = CatalogArgs::parse(strip_json(&extra));
    search_catalog(&state, &kind, &id, &args).await
}

async fn search_catalog(
    state: &AppState,
    kind: &str,
    catalog_id: &str,
    args: &CatalogArgs,
) -> Json<CatalogResponse> {
    let metas = match state.addon.catalog(kind, catalog_id, args).await {
        Ok(metas) => metas,
        Err(e) => {
            tracing::error!(%catalog_id, error = %e, "catalog request failed");
            Vec::new()
        }
    };
    Json(CatalogResponse { metas })
}

/// `/meta/{type}/{id}.json`
pub async fn meta(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Json<Value> {
    let id = strip_json(&id);
    let Some(kind) = parse_kind(&kind) else {
        return Json(json!({}));
    };

    match state.addon.meta(kind, id).await {
        Ok(record) => Json(record),
        Err(e) => {
            tracing::error!(%id, error = %e, "meta request failed");
            Json(json!({}))
        }
    }
}

/// `/stream/{type}/{id}.json`
pub async fn stream(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Json<StreamsResponse> {
    let id = strip_json(&id);
    let streams = match parse_kind(&kind) {
        Some(kind) => match state.addon.streams(kind, id).await {
            Ok(streams) => streams,
            Err(e) => {
                tracing::error!(%id, error = %e, "stream request failed");
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    Json(StreamsResponse { streams })
}

/// `/subtitles/{type}/{id}.json`
pub async fn subtitles(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Json<Value> {
    find_subtitles(&state, &kind, strip_json(&id)).await
}

/// `/subtitles/{type}/{id}/{extra}.json`; the extra args are not used
pub async fn subtitles_with_extra(
    State(state): State<AppState>,
    Path((kind, id, _extra)): Path<(String, String, String)>,
) -> Json<Value> {
    find_subtitles(&state, &kind, &id).await
}

async fn find_subtitles(state: &AppState, kind: &str, id: &str) -> Json<Value> {
    let Some(kind) = parse_kind(kind) else {
        return Json(json!({ "subtitles": [] }));
    };

    match state.addon.subtitles(kind, id).await {
        Ok(subtitles) => Json(subtitles),
        Err(e) => {
            tracing::error!(%id, error = %e, "subtitles request failed");
            Json(json!({ "subtitles": [] }))
        }
    }
}
