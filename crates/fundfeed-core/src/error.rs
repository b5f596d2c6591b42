use thiserror::Error;

/// Validation errors for configuration-level inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be blank")]
    EmptyTicker,
    #[error("ticker '{ticker}' is longer than {max} characters")]
    TickerTooLong { ticker: String, max: usize },
    #[error("ticker '{ticker}' must start with a letter")]
    TickerInvalidStart { ticker: String },
    #[error("ticker '{ticker}' contains '{ch}', which is not allowed in an output file name")]
    TickerUnsafeChar { ticker: String, ch: char },

    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("lookback of {years} years is out of range")]
    InvalidLookback { years: u8 },

    #[error("ticker list cannot be empty")]
    EmptyTickerList,
    #[error("api key cannot be empty")]
    EmptyApiKey,
}

/// Top-level error type for a single ticker's processing.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output directory '{path}': {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
