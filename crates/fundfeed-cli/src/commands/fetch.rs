use std::path::Path;
use std::sync::Arc;

use fundfeed_core::{
    runner, ProcessingDate, ReqwestHttpClient, RunConfig, Symbol, TiingoConfig, TiingoSource,
    DEFAULT_TICKERS,
};
use tracing::{info, warn};

use crate::cli::FetchArgs;
use crate::error::CliError;

pub async fn run(args: &FetchArgs, output_dir: &Path, as_of: ProcessingDate) -> Result<(), CliError> {
    let tickers = resolve_tickers(&args.tickers);
    let config = TiingoConfig::new(args.api_key.as_str())?
        .with_base_url(args.base_url.as_str())
        .with_timeout_ms(args.timeout_ms)
        .with_lookback_years(args.lookback_years);
    let source = TiingoSource::new(config, Arc::new(ReqwestHttpClient::new()));
    let run_config = RunConfig::new(tickers, output_dir, as_of)?;

    info!(
        tickers = run_config.tickers.len(),
        output_dir = %run_config.output_dir.display(),
        %as_of,
        "starting fetch"
    );
    let summary = runner::run(&run_config, &source).await?;

    if !summary.is_clean() {
        let failed = summary
            .failed
            .iter()
            .map(|failure| failure.symbol.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        warn!("{} of {} tickers failed: {failed}", summary.failed.len(), run_config.tickers.len());
    }

    Ok(())
}

/// Parse the configured tickers, or the built-in watchlist when none are
/// given. An invalid ticker is logged and skipped so the rest still run; if
/// none survive, `RunConfig::new` rejects the empty list.
fn resolve_tickers(raw: &[String]) -> Vec<Symbol> {
    let configured = raw
        .iter()
        .map(String::as_str)
        .filter(|ticker| !ticker.trim().is_empty())
        .collect::<Vec<_>>();
    let candidates = if configured.is_empty() {
        DEFAULT_TICKERS.to_vec()
    } else {
        configured
    };

    candidates
        .into_iter()
        .filter_map(|ticker| match Symbol::parse(ticker) {
            Ok(symbol) => Some(symbol),
            Err(err) => {
                warn!("Skipping ticker: {err}");
                None
            }
        })
        .collect()
}
