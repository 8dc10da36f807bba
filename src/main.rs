//! CLI entry point for range-fetch.

use anyhow::{Context, Result};
use clap::Parser;
use range_fetch::{DEFAULT_TIMEOUT_MS, RangeRequest};
use tracing::{debug, error, info};

mod app_config;
mod cli;

use app_config::FileConfig;
use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    let file_config = app_config::load_file_config(args.config.as_deref())?;

    init_tracing(&args, &file_config);
    debug!(?args, ?file_config, "configuration resolved");

    let request = build_request(&args, &file_config)?;
    info!(url = %request.url(), range = %request.range(), "fetching");

    match request.http_get().await {
        Ok(bytes) => {
            let url = request.url();
            let port = url
                .port_or_known_default()
                .map_or_else(|| "-".to_string(), |p| p.to_string());
            info!(
                protocol = url.scheme(),
                port = %port,
                host = %format!("{}:{port}", url.host_str().unwrap_or_default()),
                bytes,
                path = %request.output_path().display(),
                "saved"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, category = ?e.category(), "fetch failed");
            Err(e).with_context(|| format!("Failed to fetch {}", request.url()))
        }
    }
}

/// Priority: `RUST_LOG` > --quiet > -v/-vv > config `verbosity` > info.
fn init_tracing(args: &Args, file_config: &FileConfig) {
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => file_config
                .verbosity
                .map_or("info", app_config::VerbositySetting::filter_directive),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// CLI flags override config file values, which override library defaults.
fn build_request(args: &Args, file_config: &FileConfig) -> Result<RangeRequest> {
    let (start, end) = args.range.unwrap_or((0, 0));
    let mut request = RangeRequest::new(&args.url, start, end, &args.output)
        .with_context(|| format!("Invalid request for '{}'", args.url))?;

    request.set_timeout_connect_ms(
        args.connect_timeout_ms
            .or(file_config.connect_timeout_ms)
            .unwrap_or(DEFAULT_TIMEOUT_MS),
    );
    request.set_timeout_read_ms(
        args.read_timeout_ms
            .or(file_config.read_timeout_ms)
            .unwrap_or(DEFAULT_TIMEOUT_MS),
    );

    if let Some(user_agent) = args.user_agent.as_ref().or(file_config.user_agent.as_ref()) {
        request.add_header("User-Agent", user_agent.as_str());
    }
    for (name, value) in &args.headers {
        request.add_header(name.as_str(), value.as_str());
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["range-fetch", "http://example.com:8080/t.txt", "-o", "t.txt"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_build_request_defaults() {
        let request = build_request(&args(&[]), &FileConfig::default()).unwrap();
        assert!(request.range().is_whole());
        assert_eq!(request.timeout_connect_ms(), DEFAULT_TIMEOUT_MS);
        assert_eq!(request.timeout_read_ms(), DEFAULT_TIMEOUT_MS);
        assert_eq!(request.header("Range"), None);
    }

    #[test]
    fn test_build_request_cli_overrides_config() {
        let file_config = FileConfig {
            connect_timeout_ms: Some(1_000),
            read_timeout_ms: Some(2_000),
            user_agent: Some("from-config/1".to_string()),
            verbosity: None,
        };
        let request = build_request(
            &args(&["--read-timeout-ms", "500", "--user-agent", "from-cli/2"]),
            &file_config,
        )
        .unwrap();
        assert_eq!(request.timeout_connect_ms(), 1_000);
        assert_eq!(request.timeout_read_ms(), 500);
        assert_eq!(request.header("User-Agent"), Some("from-cli/2"));
    }

    #[test]
    fn test_build_request_header_flag_beats_user_agent_flag() {
        let request = build_request(
            &args(&["--user-agent", "a/1", "-H", "User-Agent: b/2"]),
            &FileConfig::default(),
        )
        .unwrap();
        assert_eq!(request.header("User-Agent"), Some("b/2"));
    }

    #[test]
    fn test_build_request_range_and_invalid_range() {
        let request = build_request(&args(&["-r", "0-99"]), &FileConfig::default()).unwrap();
        assert_eq!(request.header("Range"), Some("bytes=0-99"));

        let err = build_request(&args(&["-r", "9-1"]), &FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Invalid request"));
    }
}
