use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::http_client::{HttpClient, HttpRequest, TOKEN_PARAM};
use crate::normalize::RawPayloads;
use crate::source::{parse_section, PayloadSource, Section, SourceError};
use crate::{ProcessingDate, Symbol, ValidationError};

pub const DEFAULT_BASE_URL: &str = "https://api.tiingo.com";
pub const DEFAULT_LOOKBACK_YEARS: u8 = 2;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Connection settings for the Tiingo REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TiingoConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
    pub lookback_years: u8,
}

impl TiingoConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ValidationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ValidationError::EmptyApiKey);
        }
        Ok(Self {
            base_url: String::from(DEFAULT_BASE_URL),
            api_key,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            lookback_years: DEFAULT_LOOKBACK_YEARS,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_lookback_years(mut self, lookback_years: u8) -> Self {
        self.lookback_years = lookback_years;
        self
    }
}

/// Tiingo-backed [`PayloadSource`].
#[derive(Clone)]
pub struct TiingoSource {
    config: TiingoConfig,
    http_client: Arc<dyn HttpClient>,
}

impl TiingoSource {
    pub fn new(config: TiingoConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Endpoint URL for one section, including the token.
    pub fn section_url(
        &self,
        section: Section,
        symbol: &Symbol,
        as_of: ProcessingDate,
    ) -> Result<String, SourceError> {
        let base = self.config.base_url.trim_end_matches('/');
        let ticker = urlencoding::encode(symbol.as_str());

        let endpoint = match section {
            Section::Profile => format!("{base}/tiingo/daily/{ticker}"),
            Section::Stats => format!("{base}/tiingo/fundamentals/{ticker}/daily"),
            Section::Statements => {
                format!("{base}/tiingo/fundamentals/{ticker}/statements?sort=-date")
            }
            Section::Prices => {
                let start = as_of
                    .years_back(self.config.lookback_years)
                    .map_err(|e| SourceError::invalid_request(e.to_string()))?;
                format!("{base}/tiingo/daily/{ticker}/prices?startDate={start}")
            }
        };

        let separator = if endpoint.contains('?') { '&' } else { '?' };
        Ok(format!(
            "{endpoint}{separator}{TOKEN_PARAM}={}",
            urlencoding::encode(&self.config.api_key)
        ))
    }

    /// Fetch and shape-check one section.
    pub async fn fetch_section(
        &self,
        section: Section,
        symbol: &Symbol,
        as_of: ProcessingDate,
    ) -> Result<Value, SourceError> {
        let request = HttpRequest::get(self.section_url(section, symbol, as_of)?)
            .with_header("Content-Type", "application/json")
            .with_timeout_ms(self.config.timeout_ms);
        debug!(%symbol, %section, url = %request.redacted_url(), "requesting section");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| {
                if e.timed_out() {
                    SourceError::transport(format!(
                        "tiingo request timed out after {}ms",
                        self.config.timeout_ms
                    ))
                } else {
                    SourceError::transport(format!("tiingo transport error: {}", e.message()))
                }
            })?;

        if !response.is_success() {
            return Err(SourceError::status(response.status));
        }

        parse_section(section, &response.body)
    }

    async fn fetch_or_default(
        &self,
        section: Section,
        symbol: &Symbol,
        as_of: ProcessingDate,
    ) -> Value {
        match self.fetch_section(section, symbol, as_of).await {
            Ok(value) => value,
            Err(error) => {
                warn!(%symbol, %section, code = error.code(), "{}; continuing with defaults", error.message());
                Value::Null
            }
        }
    }
}

impl PayloadSource for TiingoSource {
    fn fetch<'a>(
        &'a self,
        symbol: &'a Symbol,
        as_of: ProcessingDate,
    ) -> Pin<Box<dyn Future<Output = RawPayloads> + Send + 'a>> {
        Box::pin(async move {
            let (profile, stats, statements, prices) = tokio::join!(
                self.fetch_or_default(Section::Profile, symbol, as_of),
                self.fetch_or_default(Section::Stats, symbol, as_of),
                self.fetch_or_default(Section::Statements, symbol, as_of),
                self.fetch_or_default(Section::Prices, symbol, as_of),
            );

            RawPayloads {
                profile,
                stats,
                statements,
                prices,
            }
        })
    }
}
