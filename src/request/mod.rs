//! Range request configuration and execution.
//!
//! A [`RangeRequest`] holds the target URL, an optional byte range, the
//! output path, connect/read timeouts and the request headers. Calling
//! [`RangeRequest::http_get`] performs one GET and streams the body to the
//! output file; it can be called again and each call is a fresh fetch.
//!
//! # Example
//!
//! ```no_run
//! use range_fetch::RangeRequest;
//!
//! # async fn example() -> Result<(), range_fetch::FetchError> {
//! let mut request = RangeRequest::whole_file("https://example.com/t.txt", "t.txt")?;
//! request.add_header("User-Agent", "my-agent/1.0");
//! request.set_timeout_read_ms(5_000);
//! request.http_get().await?;
//! # Ok(())
//! # }
//! ```

mod constants;
mod error;
mod fetch;
mod headers;
mod range;

use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

pub use constants::{BUFFER_SIZE, DEFAULT_TIMEOUT_MS};
pub use error::{ErrorCategory, FetchError};
pub use headers::RequestHeaders;
pub use range::ByteRange;

/// One GET against a URL, optionally restricted to a byte range, saved to a file.
///
/// Configuration changes take `&mut self` and [`http_get`](Self::http_get)
/// takes `&self`, so a request cannot be reconfigured while a fetch is in
/// flight. Two fetches of the same request at once would race on the output
/// file; callers must not do that.
#[derive(Debug, Clone)]
pub struct RangeRequest {
    url: Url,
    range: ByteRange,
    output_path: PathBuf,
    timeout_connect_ms: u64,
    timeout_read_ms: u64,
    headers: RequestHeaders,
}

impl RangeRequest {
    /// Creates a request for bytes `start..=end` of `url`, written to `output_path`.
    ///
    /// `(0, 0)` fetches the whole resource. Default headers are populated from
    /// the validated URL and range.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] if `url` is not an absolute URL with a host
    /// - [`FetchError::InvalidRange`] if either bound is negative or `start > end`
    pub fn new(
        url: &str,
        start: i64,
        end: i64,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self, FetchError> {
        let url = parse_url(url)?;
        let range = ByteRange::new(start, end)?;
        let mut request = Self {
            url,
            range,
            output_path: output_path.into(),
            timeout_connect_ms: DEFAULT_TIMEOUT_MS,
            timeout_read_ms: DEFAULT_TIMEOUT_MS,
            headers: RequestHeaders::new(),
        };
        request.set_default_headers();
        debug!(url = %request.url, range = ?request.range, "range request created");
        Ok(request)
    }

    /// Creates a request for the whole resource (range `(0, 0)`).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if `url` is not an absolute URL with a host.
    pub fn whole_file(url: &str, output_path: impl Into<PathBuf>) -> Result<Self, FetchError> {
        Self::new(url, 0, 0, output_path)
    }

    /// Target URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Replaces the target URL. Headers already set, including `Host`, are
    /// left alone until [`set_default_headers`](Self::set_default_headers) runs.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`]; the previous URL is kept.
    pub fn set_url(&mut self, url: &str) -> Result<(), FetchError> {
        self.url = parse_url(url)?;
        Ok(())
    }

    /// Current byte range.
    #[must_use]
    pub fn range(&self) -> ByteRange {
        self.range
    }

    /// Replaces the byte range. Headers already set, including `Range`, are
    /// left alone until [`set_default_headers`](Self::set_default_headers) runs.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRange`]; the previous range is kept.
    pub fn set_range(&mut self, start: i64, end: i64) -> Result<(), FetchError> {
        self.range = ByteRange::new(start, end)?;
        Ok(())
    }

    /// Destination file.
    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Replaces the destination file. Not checked until the next fetch writes it.
    pub fn set_output_path(&mut self, output_path: impl Into<PathBuf>) {
        self.output_path = output_path.into();
    }

    /// Connect timeout in milliseconds; 0 disables it.
    #[must_use]
    pub fn timeout_connect_ms(&self) -> u64 {
        self.timeout_connect_ms
    }

    /// Sets the connect timeout in milliseconds.
    pub fn set_timeout_connect_ms(&mut self, timeout_ms: u64) {
        self.timeout_connect_ms = timeout_ms;
    }

    /// Read timeout in milliseconds; 0 disables it.
    #[must_use]
    pub fn timeout_read_ms(&self) -> u64 {
        self.timeout_read_ms
    }

    /// Sets the read timeout in milliseconds.
    pub fn set_timeout_read_ms(&mut self, timeout_ms: u64) {
        self.timeout_read_ms = timeout_ms;
    }

    /// Headers sent with the next fetch.
    #[must_use]
    pub fn headers(&self) -> &RequestHeaders {
        &self.headers
    }

    /// Value stored under exactly `key`.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Sets a header, replacing the value if `key` is already present.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.upsert(key, value);
    }

    /// Removes a header. Absent keys are ignored.
    pub fn remove_header(&mut self, key: &str) {
        self.headers.remove(key);
    }

    /// Upserts the baseline header set derived from the current URL and range.
    ///
    /// Calling it again re-derives `Host` and `Range` and never duplicates
    /// entries. A stale `Range` from an earlier call is not removed when the
    /// range has since been reset to `(0, 0)`.
    pub fn set_default_headers(&mut self) {
        for (key, value) in headers::default_headers(&self.url, &self.range) {
            self.headers.upsert(key, value);
        }
    }
}

fn parse_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw).map_err(|e| FetchError::invalid_url(raw, e))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(FetchError::missing_host(raw));
    }
    Ok(url)
}
