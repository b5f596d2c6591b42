//! # fundfeed core
//!
//! Fetches per-ticker market data from Tiingo and normalizes it into the
//! JSON documents consumed by the dashboard.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Symbols, processing dates and the output record types |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`normalize`] | Raw payload to record mapping |
//! | [`runner`] | Sequential fetch, normalize, write loop |
//! | [`source`] | Payload source contract and section errors |
//! | [`tiingo`] | Tiingo REST payload source |
//!
//! ## Flow
//!
//! ```text
//! ┌────────────┐   4 sections   ┌──────────────┐
//! │ Tiingo API │──────────────▶│ TiingoSource │  failed section => null
//! └────────────┘   (joined)     └──────┬───────┘
//!                                      │ RawPayloads
//!                                      ▼
//!                               ┌──────────────┐
//!                               │  normalize   │  pure, infallible
//!                               └──────┬───────┘
//!                                      │ TickerRecord
//!                                      ▼
//!                               ┌──────────────┐
//!                               │ <SYMBOL>.json│
//!                               └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fundfeed_core::{runner, ProcessingDate, ReqwestHttpClient, RunConfig, Symbol, TiingoConfig, TiingoSource};
//!
//! let source = TiingoSource::new(TiingoConfig::new(api_key)?, Arc::new(ReqwestHttpClient::new()));
//! let config = RunConfig::new(vec![Symbol::parse("AAPL")?], "data", ProcessingDate::today())?;
//! let summary = runner::run(&config, &source).await?;
//! ```

pub mod domain;
pub mod error;
pub mod http_client;
pub mod normalize;
pub mod runner;
pub mod source;
pub mod tiingo;

pub use domain::{
    FinancialMetric, Financials, HistoryPoint, ProcessingDate, Symbol, TickerProfile,
    TickerRecord, TickerStats,
};

pub use error::{CoreError, ValidationError};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use normalize::{normalize, FieldChain, RawPayloads};

pub use runner::{RunConfig, RunSummary, TickerFailure};

pub use source::{PayloadSource, Section, SourceError, SourceErrorKind};

pub use tiingo::{TiingoConfig, TiingoSource};

/// Built-in watchlist used when no tickers are configured.
pub const DEFAULT_TICKERS: [&str; 12] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "TSLA", "META", "BRK.B", "LLY", "V", "JPM", "WMT",
];
