//! Request header map with upsert semantics and the default header set.

use std::collections::BTreeMap;

use url::Url;

use super::range::ByteRange;
use crate::user_agent;

/// Request headers keyed by exact (case-sensitive) name.
///
/// Insertion replaces any existing value for the same key, so each stored key
/// appears once. Iteration is sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: BTreeMap<String, String>,
}

impl RequestHeaders {
    /// Creates an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key`, replacing the previous value if the key is present.
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Removes `key` if present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Value stored under exactly `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// True if `key` is stored.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no header is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, value)` pairs sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Baseline headers derived from the current URL and range.
///
/// `Range` is only included when the range is not the whole-file sentinel.
pub(crate) fn default_headers(url: &Url, range: &ByteRange) -> Vec<(&'static str, String)> {
    let mut headers = vec![
        ("User-Agent", user_agent::default_user_agent()),
        ("Accept-Charset", "utf-8".to_string()),
        ("Connection", "close".to_string()),
        ("Accept-Language", "en".to_string()),
        ("Cache-Control", "no-cache".to_string()),
        ("Accept", "*/*".to_string()),
        ("Host", host_header_value(url)),
    ];
    if let Some(range) = range.header_value() {
        headers.push(("Range", range));
    }
    headers
}

/// `host:port`, using the scheme's default port when the URL has none.
fn host_header_value(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port_or_known_default() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lookup<'a>(headers: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_upsert_replaces_existing_value() {
        let mut headers = RequestHeaders::new();
        headers.upsert("X-Token", "one");
        headers.upsert("X-Token", "two");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-Token"), Some("two"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut headers = RequestHeaders::new();
        headers.upsert("Accept", "*/*");
        headers.upsert("accept", "text/plain");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Accept"), Some("*/*"));
        assert_eq!(headers.get("ACCEPT"), None);
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut headers = RequestHeaders::new();
        assert_eq!(headers.remove("Missing"), None);
        assert!(headers.is_empty());
    }

    #[test]
    fn test_iter_is_sorted_by_name() {
        let mut headers = RequestHeaders::new();
        headers.upsert("b", "2");
        headers.upsert("a", "1");
        headers.upsert("c", "3");
        let names: Vec<&str> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_default_headers_fixed_values() {
        let url = Url::parse("http://example.com:8080/t.txt").unwrap();
        let headers = default_headers(&url, &ByteRange::WHOLE);
        assert_eq!(lookup(&headers, "Accept-Charset"), Some("utf-8"));
        assert_eq!(lookup(&headers, "Connection"), Some("close"));
        assert_eq!(lookup(&headers, "Accept-Language"), Some("en"));
        assert_eq!(lookup(&headers, "Cache-Control"), Some("no-cache"));
        assert_eq!(lookup(&headers, "Accept"), Some("*/*"));
        assert_eq!(lookup(&headers, "Host"), Some("example.com:8080"));
        assert!(lookup(&headers, "User-Agent").is_some());
        assert_eq!(lookup(&headers, "Range"), None);
    }

    #[test]
    fn test_default_headers_range_only_when_restricted() {
        let url = Url::parse("http://example.com/t.txt").unwrap();
        let range = ByteRange::new(0, 99).unwrap();
        let headers = default_headers(&url, &range);
        assert_eq!(lookup(&headers, "Range"), Some("bytes=0-99"));
    }

    #[test]
    fn test_host_header_uses_scheme_default_port() {
        let http = Url::parse("http://example.com/t.txt").unwrap();
        let https = Url::parse("https://example.com/t.txt").unwrap();
        assert_eq!(host_header_value(&http), "example.com:80");
        assert_eq!(host_header_value(&https), "example.com:443");
    }

    #[test]
    fn test_host_header_keeps_ipv6_brackets() {
        let url = Url::parse("http://[::1]:9000/").unwrap();
        assert_eq!(host_header_value(&url), "[::1]:9000");
    }
}
