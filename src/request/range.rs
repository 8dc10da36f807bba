//! Validated byte range with the `(0, 0)` whole-file sentinel.

use std::fmt;

use super::error::FetchError;

/// Inclusive byte range `start..=end` sent as `Range: bytes=start-end`.
///
/// `(0, 0)` means "no range restriction": the whole resource is fetched and
/// no `Range` header is sent. A literal one-byte range at offset 0 is
/// therefore not expressible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ByteRange {
    start: u64,
    end: u64,
}

impl ByteRange {
    /// The whole-file sentinel.
    pub const WHOLE: Self = Self { start: 0, end: 0 };

    /// Validates and builds a range.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRange`] when either bound is negative or
    /// `start > end`.
    pub fn new(start: i64, end: i64) -> Result<Self, FetchError> {
        if start > end {
            return Err(FetchError::invalid_range(start, end));
        }
        let (Ok(lo), Ok(hi)) = (u64::try_from(start), u64::try_from(end)) else {
            return Err(FetchError::invalid_range(start, end));
        };
        Ok(Self { start: lo, end: hi })
    }

    /// First byte of the range.
    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last byte of the range (inclusive).
    #[must_use]
    pub fn end(&self) -> u64 {
        self.end
    }

    /// True for the `(0, 0)` sentinel.
    #[must_use]
    pub fn is_whole(&self) -> bool {
        *self == Self::WHOLE
    }

    /// `Range` header value, or `None` for the whole-file sentinel.
    #[must_use]
    pub fn header_value(&self) -> Option<String> {
        (!self.is_whole()).then(|| self.to_string())
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bytes={}-{}", self.start, self.end)
    }
}
