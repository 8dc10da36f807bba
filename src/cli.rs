//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Fetch a URL, or a byte range of it, into a local file.
///
/// Sends one GET with a fixed header set (plus `Range` when --range is
/// given) and writes the body of a 200 or 206 response to --output.
#[derive(Parser, Debug)]
#[command(name = "range-fetch")]
#[command(author, version, about)]
pub struct Args {
    /// URL to fetch
    pub url: String,

    /// File to write the response body to (truncated if it exists)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Inclusive byte range START-END; omit (or pass 0-0) for the whole file
    #[arg(short, long, value_parser = parse_range)]
    pub range: Option<(i64, i64)>,

    /// Extra request header as 'Name: value' (repeatable, overrides defaults)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// User-Agent header value
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Connect timeout in milliseconds (0 disables)
    #[arg(long)]
    pub connect_timeout_ms: Option<u64>,

    /// Read timeout in milliseconds (0 disables)
    #[arg(long)]
    pub read_timeout_ms: Option<u64>,

    /// Config file (defaults to $XDG_CONFIG_HOME/range-fetch/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_range(raw: &str) -> Result<(i64, i64), String> {
    let (start, end) = raw
        .split_once('-')
        .ok_or_else(|| format!("expected START-END, got '{raw}'"))?;
    let start = start
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid range start '{start}': {e}"))?;
    let end = end
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid range end '{end}': {e}"))?;
    Ok((start, end))
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in '{raw}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_minimal_args() {
        let args =
            Args::try_parse_from(["range-fetch", "http://example.com/t.txt", "-o", "t.txt"])
                .unwrap();
        assert_eq!(args.url, "http://example.com/t.txt");
        assert_eq!(args.output, PathBuf::from("t.txt"));
        assert_eq!(args.range, None);
        assert!(args.headers.is_empty());
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_range_parses_pair() {
        let args = Args::try_parse_from([
            "range-fetch",
            "http://example.com/t.txt",
            "-o",
            "t.txt",
            "--range",
            "0-99",
        ])
        .unwrap();
        assert_eq!(args.range, Some((0, 99)));
    }

    #[test]
    fn test_cli_range_rejects_garbage() {
        let result = Args::try_parse_from([
            "range-fetch",
            "http://example.com/t.txt",
            "-o",
            "t.txt",
            "--range",
            "ten",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_repeated_headers() {
        let args = Args::try_parse_from([
            "range-fetch",
            "http://example.com/t.txt",
            "-o",
            "t.txt",
            "-H",
            "X-One: 1",
            "--header",
            "Accept:text/plain",
        ])
        .unwrap();
        assert_eq!(
            args.headers,
            vec![
                ("X-One".to_string(), "1".to_string()),
                ("Accept".to_string(), "text/plain".to_string()),
            ]
        );
    }

    #[test]
    fn test_cli_header_requires_colon() {
        assert!(parse_header("NoColon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["range-fetch", "http://h/", "-o", "x", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_output_is_required() {
        let result = Args::try_parse_from(["range-fetch", "http://h/"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let result = Args::try_parse_from(["range-fetch", "--help"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::DisplayHelp
        );
    }
}
