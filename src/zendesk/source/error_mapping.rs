//! Error mapping helpers for the API-backed ticket source.

use http::StatusCode;

use crate::zendesk::error::SourceError;

/// Maps an upstream error status onto the source error taxonomy.
///
/// Callers are expected to have already filtered out success statuses; every
/// status handed in here becomes an error value.
pub(super) fn classify_status(status: StatusCode) -> SourceError {
    match status {
        StatusCode::UNAUTHORIZED => SourceError::Unauthorized,
        StatusCode::BAD_GATEWAY => SourceError::UpstreamUnavailable,
        other => SourceError::Upstream {
            status: other.as_u16(),
        },
    }
}

/// Wraps a reqwest transport failure with the operation that hit it.
pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> SourceError {
    SourceError::Transport {
        message: format!("{operation} failed: {error}"),
    }
}

/// Wraps a body-decoding failure with the operation that hit it.
pub(super) fn map_decode_error(operation: &str, error: &reqwest::Error) -> SourceError {
    SourceError::Decode {
        message: format!("{operation} returned an unexpected body: {error}"),
    }
}
