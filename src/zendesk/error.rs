//! Error types exposed by the ticket data-access layer.

use thiserror::Error;

/// Errors surfaced while building requests for, talking to, or decoding
/// responses from the upstream ticket service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The upstream rejected the supplied credentials (HTTP 401).
    #[error("unauthorized access: check your credentials")]
    Unauthorized,

    /// The upstream's gateway reported it unreachable (HTTP 502).
    #[error("the ticket service is temporarily unavailable: try again later")]
    UpstreamUnavailable,

    /// The upstream answered with any other error status.
    #[error("there was an error with the API, status code {status}")]
    Upstream {
        /// HTTP status code the upstream returned.
        status: u16,
    },

    /// Networking failed while calling the upstream.
    #[error("network error talking to the ticket service: {message}")]
    Transport {
        /// Transport-level error detail.
        message: String,
    },

    /// The upstream body could not be decoded into the expected shape.
    #[error("unexpected response from the ticket service: {message}")]
    Decode {
        /// Detail describing what failed to decode.
        message: String,
    },

    /// A ticket response arrived without its sideloaded requester user.
    #[error("ticket response did not include the requester user")]
    MissingSideload,

    /// The requested ticket id is not a positive integer.
    #[error("ticket id must be a positive integer")]
    InvalidTicketId,

    /// A URL could not be parsed or constructed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
