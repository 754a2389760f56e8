//! HTTP client construction for the API-backed ticket source.

use std::time::Duration;

use crate::zendesk::error::SourceError;

/// Builds the shared reqwest client with the configured request timeout.
///
/// The timeout covers the whole request, connection setup included, so a
/// stalled upstream surfaces as a transport error instead of a hung page.
///
/// # Errors
///
/// Returns `SourceError::Configuration` when the underlying TLS or resolver
/// setup fails.
pub(super) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|error| SourceError::Configuration {
            message: format!("failed to build the upstream HTTP client: {error}"),
        })
}
