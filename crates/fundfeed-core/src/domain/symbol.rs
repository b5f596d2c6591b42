use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_TICKER_LEN: usize = 15;

/// Uppercase ticker symbol, also used as the stem of its output file.
///
/// A ticker starts with a letter and holds only letters, digits, `.` and
/// `-`, so `<TICKER>.json` always stays inside the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trim and uppercase `input`, rejecting anything unsafe as a file stem.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let ticker = input.trim().to_ascii_uppercase();

        let Some(first) = ticker.chars().next() else {
            return Err(ValidationError::EmptyTicker);
        };
        if !first.is_ascii_alphabetic() {
            return Err(ValidationError::TickerInvalidStart { ticker });
        }

        let unsafe_char = ticker.chars().find(|ch| !is_file_safe(*ch));
        if let Some(ch) = unsafe_char {
            return Err(ValidationError::TickerUnsafeChar { ticker, ch });
        }

        if ticker.len() > MAX_TICKER_LEN {
            return Err(ValidationError::TickerTooLong {
                ticker,
                max: MAX_TICKER_LEN,
            });
        }

        Ok(Self(ticker))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name the runner writes this symbol's record to.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

fn is_file_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-')
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
