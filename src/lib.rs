//! Range Fetch Library
//!
//! Issues one HTTP GET, optionally restricted to a byte range through the
//! `Range` header, and streams the response body into a local file.
//!
//! # Architecture
//!
//! - [`request`] - the [`RangeRequest`] configuration type and its fetch
//!
//! # Example
//!
//! ```no_run
//! use range_fetch::RangeRequest;
//!
//! # async fn example() -> Result<(), range_fetch::FetchError> {
//! let request = RangeRequest::new("https://example.com/firmware.bin", 0, 1023, "head.bin")?;
//! let written = request.http_get().await?;
//! println!("wrote {written} bytes");
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod request;
mod user_agent;

// Re-export commonly used types
pub use request::{
    BUFFER_SIZE, ByteRange, DEFAULT_TIMEOUT_MS, ErrorCategory, FetchError, RangeRequest,
    RequestHeaders,
};
