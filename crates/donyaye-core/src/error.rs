//! Error types for the Donyaye Serial addon
//!
//! Provides a single error enum with human-readable messages and
//! string serialization, plus the logging helper that turns transport
//! failures into structured diagnostics.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Maximum number of response-body bytes kept for diagnostics
const BODY_SNIPPET_LEN: usize = 300;

/// Error type for all addon operations
#[derive(Error, Debug)]
pub enum AddonError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Failed to parse a payload
    #[error("Failed to parse: {0}")]
    ParseError(String),

    /// Expected HTML element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Composite identifier could not be built or decoded
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// A credential required by an optional service is not configured
    #[error("Missing credential: {0}")]
    MissingCredential(String),
}

impl AddonError {
    /// Builds a [`AddonError::Status`] keeping only a short body snippet
    pub fn status(status: u16, body: &str) -> Self {
        let body = match body.char_indices().nth(BODY_SNIPPET_LEN) {
            Some((idx, _)) => format!("{}...", &body[..idx]),
            None => body.to_string(),
        };
        AddonError::Status { status, body }
    }
}

impl Serialize for AddonError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for addon operations
pub type Result<T> = std::result::Result<T, AddonError>;

/// Logs a failed outbound request with the detail the failure allows
///
/// Distinguishes an upstream error status (status and body snippet),
/// a request that never got a response, and a request that could not
/// be built at all.
pub fn log_request_error(context: &str, error: &AddonError) {
    match error {
        AddonError::Status { status, body } => {
            tracing::error!(%context, status, %body, "upstream returned an error status");
        }
        AddonError::HttpError(e) if e.is_builder() => {
            tracing::error!(%context, error = %e, "request setup failed");
        }
        AddonError::HttpError(e) => {
            tracing::error!(
                %context,
                error = %e,
                timeout = e.is_timeout(),
                url = e.url().map(|u| u.as_str()).unwrap_or_default(),
                "no response received"
            );
        }
        other => {
            tracing::error!(%context, error = %other, "unexpected error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse_error() {
        let error = AddonError::ParseError("invalid HTML".to_string());
        assert_eq!(error.to_string(), "Failed to parse: invalid HTML");
    }

    #[test]
    fn test_error_display_element_not_found() {
        let error = AddonError::ElementNotFound(".dl-box-alert.--notif".to_string());
        assert_eq!(error.to_string(), "Element not found: .dl-box-alert.--notif");
    }

    #[test]
    fn test_error_display_invalid_id() {
        let error = AddonError::InvalidId("ds_other___slug".to_string());
        assert_eq!(error.to_string(), "Invalid identifier: ds_other___slug");
    }

    #[test]
    fn test_error_display_missing_credential() {
        let error = AddonError::MissingCredential("TMDB_API_KEY".to_string());
        assert_eq!(error.to_string(), "Missing credential: TMDB_API_KEY");
    }

    #[test]
    fn test_status_keeps_short_body() {
        let error = AddonError::status(403, "Forbidden");
        assert_eq!(error.to_string(), "Unexpected status 403: Forbidden");
    }

    #[test]
    fn test_status_truncates_long_body() {
        let body = "x".repeat(1000);
        match AddonError::status(500, &body) {
            AddonError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), BODY_SNIPPET_LEN + 3);
                assert!(body.ends_with("..."));
            }
            _ => panic!("Expected Status error"),
        }
    }

    #[test]
    fn test_status_truncates_on_char_boundary() {
        let body = "فصل".repeat(200);
        match AddonError::status(502, &body) {
            AddonError::Status { body, .. } => {
                assert_eq!(body.chars().count(), BODY_SNIPPET_LEN + 3);
            }
            _ => panic!("Expected Status error"),
        }
    }

    #[test]
    fn test_error_serialize() {
        let error = AddonError::InvalidId("true-detective".to_string());
        let json = serde_json::to_string(&error).expect("Serialization should succeed");
        assert_eq!(json, "\"Invalid identifier: true-detective\"");
    }
}
