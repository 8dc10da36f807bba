//! Executes a [`RangeRequest`]: one GET, status check, body streamed to disk.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};

use super::RangeRequest;
use super::constants::BUFFER_SIZE;
use super::error::FetchError;

impl RangeRequest {
    /// Fetches the configured URL and writes the body to the output file.
    ///
    /// Only 200 and 206 are accepted. The output file is created or truncated
    /// after the status check, so a rejected response leaves it untouched.
    /// The body is written in [`BUFFER_SIZE`] blocks with no length check; if
    /// the stream breaks midway the bytes already written stay on disk.
    ///
    /// Each call is an independent fetch. Redirects are not followed.
    ///
    /// # Returns
    ///
    /// The number of body bytes written.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidHeader`] if a stored header cannot be sent
    /// - [`FetchError::Connect`] / [`FetchError::Timeout`] on transport failure
    /// - [`FetchError::UnexpectedStatus`] for any status other than 200 or 206
    /// - [`FetchError::BodyRead`] if the body stream fails
    /// - [`FetchError::Io`] if the output file cannot be created or written
    #[instrument(
        skip(self),
        fields(url = %self.url, range = %self.range, path = %self.output_path.display())
    )]
    pub async fn http_get(&self) -> Result<u64, FetchError> {
        let headers = self.header_map()?;
        let client = build_client(self.timeout_connect_ms, self.timeout_read_ms)?;
        let url = self.url.as_str();

        debug!(headers = headers.len(), "sending GET");
        let response = client
            .get(self.url.clone())
            .headers(headers)
            .send()
            .await
            .map_err(|e| FetchError::connect(url, e))?;

        let status = response.status();
        if !matches!(status, StatusCode::OK | StatusCode::PARTIAL_CONTENT) {
            debug!(status = status.as_u16(), "rejecting response");
            return Err(FetchError::unexpected_status(url, status.as_u16()));
        }
        debug!(status = status.as_u16(), "response accepted");

        let file = File::create(&self.output_path)
            .await
            .map_err(|e| FetchError::io(&self.output_path, e))?;
        let bytes_written = stream_to_file(file, response, url, &self.output_path).await?;
        drop(client);

        info!(bytes = bytes_written, status = status.as_u16(), "fetch complete");
        Ok(bytes_written)
    }

    /// Converts the stored headers into wire headers. Keys that collapse to
    /// the same header name keep the value that sorts last.
    fn header_map(&self) -> Result<HeaderMap, FetchError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (key, value) in self.headers.iter() {
            let name =
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| FetchError::invalid_header(key))?;
            let value = HeaderValue::from_str(value).map_err(|_| FetchError::invalid_header(key))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

/// Streams the response body to `file` in [`BUFFER_SIZE`] blocks.
///
/// The body stream is released first, then the file is flushed and closed;
/// this holds on the failure path too, so partial output reaches disk.
async fn stream_to_file(
    file: File,
    response: Response,
    url: &str,
    path: &Path,
) -> Result<u64, FetchError> {
    let mut writer = BufWriter::with_capacity(BUFFER_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;
    let mut failure = None;

    'body: while let Some(chunk_result) = stream.next().await {
        let chunk = match chunk_result {
            Ok(chunk) => chunk,
            Err(e) => {
                failure = Some(FetchError::body_read(url, e));
                break;
            }
        };
        for block in chunk.chunks(BUFFER_SIZE) {
            if let Err(e) = writer.write_all(block).await {
                failure = Some(FetchError::io(path, e));
                break 'body;
            }
            bytes_written += block.len() as u64;
        }
    }
    drop(stream);

    let flushed = writer.flush().await.map_err(|e| FetchError::io(path, e));
    drop(writer);

    if let Some(error) = failure {
        warn!(bytes = bytes_written, error = %error, "fetch failed mid-body, partial output kept");
        return Err(error);
    }
    flushed?;
    Ok(bytes_written)
}

/// Builds a single-use HTTP/1.1 client. A zero timeout disables that timeout.
fn build_client(connect_timeout_ms: u64, read_timeout_ms: u64) -> Result<Client, FetchError> {
    let mut builder = Client::builder().http1_only().redirect(Policy::none());
    if connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(connect_timeout_ms));
    }
    if read_timeout_ms > 0 {
        builder = builder.read_timeout(Duration::from_millis(read_timeout_ms));
    }
    builder.build().map_err(|source| FetchError::Client { source })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_header_map_carries_every_entry() {
        let mut request = RangeRequest::new("http://127.0.0.1:9/t.txt", 0, 10, "out").unwrap();
        request.add_header("X-Device-Id", "abc");
        let map = request.header_map().unwrap();
        assert_eq!(map.len(), request.headers().len());
        assert_eq!(map.get("range").unwrap(), "bytes=0-10");
        assert_eq!(map.get("host").unwrap(), "127.0.0.1:9");
        assert_eq!(map.get("x-device-id").unwrap(), "abc");
    }

    #[test]
    fn test_header_map_collapses_case_variants() {
        let mut request = RangeRequest::whole_file("http://127.0.0.1:9/t.txt", "out").unwrap();
        request.add_header("accept", "text/plain");
        let map = request.header_map().unwrap();
        assert_eq!(map.get_all("accept").iter().count(), 1);
        // "Accept" < "accept" in byte order, so the lowercase entry is applied last.
        assert_eq!(map.get("accept").unwrap(), "text/plain");
    }

    #[test]
    fn test_header_map_rejects_invalid_name() {
        let mut request = RangeRequest::whole_file("http://127.0.0.1:9/t.txt", "out").unwrap();
        request.add_header("Bad Name", "x");
        let err = request.header_map().unwrap_err();
        assert!(matches!(err, FetchError::InvalidHeader { ref name } if name == "Bad Name"));
    }

    #[test]
    fn test_header_map_rejects_invalid_value() {
        let mut request = RangeRequest::whole_file("http://127.0.0.1:9/t.txt", "out").unwrap();
        request.add_header("X-Bad", "line\nbreak");
        assert!(matches!(
            request.header_map(),
            Err(FetchError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_build_client_accepts_zero_timeouts() {
        assert!(build_client(0, 0).is_ok());
        assert!(build_client(30_000, 30_000).is_ok());
    }
}
