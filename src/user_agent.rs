//! Default User-Agent string sent with every fetch.
//!
//! Callers override it per request with `RangeRequest::add_header("User-Agent", ..)`.

/// Product token used in the User-Agent header.
const PRODUCT: &str = "range-fetch";

/// Default User-Agent for fetch requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{PRODUCT}/{version}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent_contains_crate_version() {
        let ua = default_user_agent();
        assert_eq!(
            ua.strip_prefix("range-fetch/"),
            Some(env!("CARGO_PKG_VERSION")),
            "UA must be product/version: {ua}"
        );
    }
}
