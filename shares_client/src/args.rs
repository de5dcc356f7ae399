//! Command-line arguments for the shares client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, ValueEnum};
use shares_common::api::DEFAULT_BASE_URL;

/// Where the list of companies comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectoryMode {
    /// The built-in list of six companies.
    Builtin,
    /// A `SYMBOL,Name` per line file given by `--companies`.
    File,
    /// The server's top gainers, refetched when the connection returns.
    Gainers,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the quotes API (the hosted API or a local sandbox).
    #[clap(long, env = "SHARES_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// API token sent as the `token` query parameter.
    #[clap(long, env = "SHARES_API_TOKEN", default_value = "sandbox", hide_env_values = true)]
    pub token: String,

    /// Source of the company list.
    #[clap(long, value_enum, default_value_t = DirectoryMode::Gainers)]
    pub directory: DirectoryMode,

    /// Path to a companies file, used with `--directory file`.
    #[clap(long)]
    pub companies: Option<String>,

    /// Interval between reachability probes, in milliseconds.
    #[clap(long, default_value_t = 2000)]
    pub probe_interval_ms: u64,

    /// Timeout of each HTTP request and probe, in milliseconds.
    #[clap(long, default_value_t = 5000)]
    pub timeout_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_the_gainers_directory() {
        let args = Args::try_parse_from(["shares", "--token", "t"]).expect("parses");
        assert_eq!(args.directory, DirectoryMode::Gainers);
        assert_eq!(args.token, "t");
        assert_eq!(args.probe_interval_ms, 2000);
        assert!(args.companies.is_none());
    }

    #[test]
    fn parses_file_directory() {
        let args = Args::try_parse_from([
            "shares",
            "--directory",
            "file",
            "--companies",
            "watchlist.txt",
            "--base-url",
            "https://cloud.iexapis.com/stable",
        ])
        .expect("parses");
        assert_eq!(args.directory, DirectoryMode::File);
        assert_eq!(args.companies.as_deref(), Some("watchlist.txt"));
        assert_eq!(args.base_url, "https://cloud.iexapis.com/stable");
    }

    #[test]
    fn rejects_unknown_directory() {
        assert!(Args::try_parse_from(["shares", "--directory", "nasdaq"]).is_err());
    }
}
