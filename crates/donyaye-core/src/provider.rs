//! Provider contract
//!
//! A provider is one source site. The addon talks to it only through
//! these operations; adding a site means adding an implementation.

use std::future::Future;

use crate::types::{MediaKind, SourceItem, StreamLink};

/// Capabilities every source site must offer
///
/// Failures are logged by the implementation and reported as empty
/// results; none of these operations can fail the request.
pub trait Provider: Send + Sync + 'static {
    /// Namespace token embedded in composite identifiers
    fn name(&self) -> &str;

    /// Searches the site for titles of the given kind
    fn search(&self, query: &str, kind: MediaKind) -> impl Future<Output = Vec<SourceItem>> + Send;

    /// Downloads a title's detail page, `None` if it could not be fetched
    fn fetch_detail_page(
        &self,
        kind: MediaKind,
        slug: &str,
    ) -> impl Future<Output = Option<String>> + Send;

    /// Resolves the canonical (IMDb) id of a detail page
    fn resolve_external_id(&self, page: &str) -> impl Future<Output = Option<String>> + Send;

    /// Extracts playable links for a title (or one episode of it)
    ///
    /// `external_ref` is the third identifier segment: a plain id for
    /// movies, `{id}:{season}:{episode}` for episodes.
    fn resolve_streams(
        &self,
        kind: MediaKind,
        external_ref: &str,
        page: &str,
        slug: &str,
    ) -> impl Future<Output = Vec<StreamLink>> + Send;
}
