//! Constants for the request module (timeouts, streaming block size).

/// Default connect and read timeout in milliseconds (30 seconds).
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Size of the blocks the response body is written to disk in.
pub const BUFFER_SIZE: usize = 4 * 1024;
