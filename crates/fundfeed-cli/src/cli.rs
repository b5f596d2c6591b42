//! CLI argument definitions for fundfeed.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `fetch` | Fetch, normalize and write one JSON file per ticker |
//! | `normalize` | Normalize captured payload files and print the record |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--output-dir` | `data` | Directory receiving `<SYMBOL>.json` files |
//! | `--as-of` | today (UTC) | Processing date, `YYYY-MM-DD` |
//!
//! # Examples
//!
//! ```bash
//! # Refresh the whole watchlist
//! TIINGO_API_KEY=... fundfeed fetch
//!
//! # Refresh two tickers into a custom directory
//! fundfeed fetch AAPL MSFT --output-dir public/data
//!
//! # Re-run the mapping on saved payloads
//! fundfeed normalize --symbol AAPL --input-dir captures/AAPL
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fundfeed_core::tiingo::{DEFAULT_BASE_URL, DEFAULT_LOOKBACK_YEARS, DEFAULT_TIMEOUT_MS};
use fundfeed_core::ProcessingDate;

/// Ticker data feed for the fundamentals dashboard.
#[derive(Debug, Parser)]
#[command(
    name = "fundfeed",
    author,
    version,
    about = "Fetch Tiingo fundamentals and price history into dashboard JSON"
)]
pub struct Cli {
    /// Directory receiving one `<SYMBOL>.json` file per ticker.
    #[arg(long, global = true, env = "FUNDFEED_OUTPUT_DIR", default_value = "data")]
    pub output_dir: PathBuf,

    /// Processing date (YYYY-MM-DD). Defaults to today in UTC.
    ///
    /// Statements dated after it are dropped, and the price history window
    /// ends on it.
    #[arg(long, global = true)]
    pub as_of: Option<ProcessingDate>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn processing_date(&self) -> ProcessingDate {
        self.as_of.unwrap_or_else(ProcessingDate::today)
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every configured ticker and write its normalized record.
    ///
    /// Tickers are processed in order. A ticker that fails is reported and
    /// skipped; the run continues with the next one.
    Fetch(FetchArgs),

    /// Normalize payloads saved on disk and print the record to stdout.
    ///
    /// Reads `profile.json`, `stats.json`, `statements.json` and
    /// `prices.json` from the input directory. Missing or unreadable files
    /// are treated like failed fetches.
    Normalize(NormalizeArgs),
}

/// Arguments for the `fetch` command.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Tickers to fetch, in order. Defaults to the configured watchlist.
    #[arg(env = "FUNDFEED_TICKERS", value_delimiter = ',')]
    pub tickers: Vec<String>,

    /// Tiingo API token.
    #[arg(long, env = "TIINGO_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Tiingo API base URL.
    #[arg(long, env = "TIINGO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Years of daily price history to request.
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_YEARS)]
    pub lookback_years: u8,
}

/// Arguments for the `normalize` command.
#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Ticker the payloads belong to.
    #[arg(long)]
    pub symbol: String,

    /// Directory holding the captured payload files.
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Also write the record to the output directory.
    #[arg(long, default_value_t = false)]
    pub write: bool,
}
