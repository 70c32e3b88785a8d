//! Error types for the movie API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because views distinguish "the movie
//! does not exist" from "the server returned an unexpected status." The
//! service signals a missing movie either with 404 or with an empty success
//! body; both land here. Transport failures are split into `Timeout` and
//! everything else so callers can tell a slow backend from an absent one.

use thiserror::Error;

/// Errors returned by `MovieClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404, or a success status with no movie in the body.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The request could not be delivered (DNS, connect, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A local file selected for upload could not be read.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
