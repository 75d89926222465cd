//! Error types for the member API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the detail screen is routinely
//! asked for ids that no longer exist. All other non-2xx responses land in
//! `HttpError` with the raw status code and body for debugging. `Transport`
//! carries host-reported failures (DNS, refused connection, timeout) back
//! across the build/parse boundary so they flow through the same state
//! machine as every other failure.

use std::fmt;

/// Errors surfaced by `MemberClient` parsing and by host-side transport.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404 — the requested member does not exist.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    HttpError { status: u16, body: String },

    /// The host failed to execute the request at all.
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "member not found"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::Transport(msg) => {
                write!(f, "network request failed: {msg}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
