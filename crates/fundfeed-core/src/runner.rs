//! Batch runner: fetch, normalize and write one file per ticker.
//!
//! Tickers are processed strictly in order, one at a time. A failure while
//! writing one ticker is logged and the run moves on; only failing to create
//! the output directory aborts the batch.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::normalize::normalize;
use crate::source::PayloadSource;
use crate::{CoreError, ProcessingDate, Symbol, TickerRecord, ValidationError};

/// Validated inputs for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub tickers: Vec<Symbol>,
    pub output_dir: PathBuf,
    pub as_of: ProcessingDate,
}

impl RunConfig {
    pub fn new(
        tickers: Vec<Symbol>,
        output_dir: impl Into<PathBuf>,
        as_of: ProcessingDate,
    ) -> Result<Self, ValidationError> {
        if tickers.is_empty() {
            return Err(ValidationError::EmptyTickerList);
        }
        Ok(Self {
            tickers,
            output_dir: output_dir.into(),
            as_of,
        })
    }
}

/// Outcome of one ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerFailure {
    pub symbol: Symbol,
    pub message: String,
}

/// Outcome of a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: Vec<Symbol>,
    pub failed: Vec<TickerFailure>,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run the batch against `source`.
///
/// # Errors
///
/// Returns [`CoreError::OutputDir`] if the output directory cannot be
/// created. Per-ticker failures are collected in the summary instead.
pub async fn run(config: &RunConfig, source: &dyn PayloadSource) -> Result<RunSummary, CoreError> {
    fs::create_dir_all(&config.output_dir).map_err(|source| CoreError::OutputDir {
        path: config.output_dir.display().to_string(),
        source,
    })?;

    let mut summary = RunSummary::default();
    for symbol in &config.tickers {
        info!("Fetching {symbol}...");

        let payloads = source.fetch(symbol, config.as_of).await;
        let record = normalize(symbol, &payloads, config.as_of);

        match write_record(&config.output_dir, symbol, &record) {
            Ok(path) => {
                info!(path = %path.display(), "Success: {symbol}");
                summary.succeeded.push(symbol.clone());
            }
            Err(err) => {
                error!("Error fetching {symbol}: {err}");
                summary.failed.push(TickerFailure {
                    symbol: symbol.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    info!(
        succeeded = summary.succeeded.len(),
        failed = summary.failed.len(),
        "run complete"
    );
    Ok(summary)
}

/// Write `record` as pretty-printed JSON to `<dir>/<SYMBOL>.json`.
pub fn write_record(dir: &Path, symbol: &Symbol, record: &TickerRecord) -> Result<PathBuf, CoreError> {
    let path = dir.join(symbol.file_name());
    let mut body = serde_json::to_string_pretty(record)?;
    body.push('\n');

    fs::write(&path, body).map_err(|source| CoreError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(path)
}
