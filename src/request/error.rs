//! Error types for range requests.
//!
//! Validation failures come from construction and the setters; everything
//! else comes from [`RangeRequest::http_get`](super::RangeRequest::http_get).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring or executing a range request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL string is malformed, relative, or has no host.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The rejected URL string.
        url: String,
        /// The parse failure, when the string did not parse at all.
        #[source]
        source: Option<url::ParseError>,
    },

    /// The byte range is negative or inverted.
    #[error("invalid byte range {start}-{end}: expected 0 <= start <= end")]
    InvalidRange {
        /// Requested first byte.
        start: i64,
        /// Requested last byte.
        end: i64,
    },

    /// A stored header cannot be sent on the wire.
    #[error("invalid request header {name:?}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The HTTP client could not be built from the configured timeouts.
    #[error("failed to build HTTP client: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Connection could not be established or the request could not be sent.
    #[error("connection failed for {url}: {source}")]
    Connect {
        /// The URL being fetched.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Connect or read timeout expired.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL being fetched.
        url: String,
    },

    /// The server answered with a status other than 200 or 206.
    #[error("response code was {status} fetching {url}")]
    UnexpectedStatus {
        /// The URL being fetched.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body stream broke after the status check.
    #[error("error reading response body from {url}: {source}")]
    BodyRead {
        /// The URL being fetched.
        url: String,
        /// The underlying stream error.
        #[source]
        source: reqwest::Error,
    },

    /// Creating or writing the output file failed.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The output file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected input; nothing was sent.
    Validation,
    /// Transport, status or file failure during a fetch.
    Io,
}

impl FetchError {
    /// Creates an invalid URL error from a parse failure.
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source: Some(source),
        }
    }

    /// Creates an invalid URL error for a URL that parsed but has no host.
    pub fn missing_host(url: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source: None,
        }
    }

    /// Creates an invalid range error.
    #[must_use]
    pub fn invalid_range(start: i64, end: i64) -> Self {
        Self::InvalidRange { start, end }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>) -> Self {
        Self::InvalidHeader { name: name.into() }
    }

    /// Creates a transport error, promoting timeouts to [`FetchError::Timeout`].
    pub fn connect(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Connect {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates a body read error, promoting timeouts to [`FetchError::Timeout`].
    pub fn body_read(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::BodyRead {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates an unexpected status error.
    pub fn unexpected_status(url: impl Into<String>, status: u16) -> Self {
        Self::UnexpectedStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Classifies the error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidUrl { .. } | Self::InvalidRange { .. } | Self::InvalidHeader { .. } => {
                ErrorCategory::Validation
            }
            Self::Client { .. }
            | Self::Connect { .. }
            | Self::Timeout { .. }
            | Self::UnexpectedStatus { .. }
            | Self::BodyRead { .. }
            | Self::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Returns true when a connect or read timeout expired.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns the HTTP status for [`FetchError::UnexpectedStatus`].
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// URL or path for context, so the helper constructors above are used instead.
