//! Upstream payload source contract.
//!
//! A [`PayloadSource`] hands the runner the four raw payloads for a ticker.
//! Per-section failures are reported as [`SourceError`] inside the source and
//! degraded there, so `fetch` itself cannot fail.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::normalize::RawPayloads;
use crate::{ProcessingDate, Symbol};

/// One of the four upstream payloads fetched per ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Profile,
    Stats,
    Statements,
    Prices,
}

impl Section {
    pub const ALL: [Self; 4] = [Self::Profile, Self::Stats, Self::Statements, Self::Prices];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Stats => "stats",
            Self::Statements => "statements",
            Self::Prices => "prices",
        }
    }

    /// Profile is a single object; every other section is a list.
    pub const fn expects_list(self) -> bool {
        !matches!(self, Self::Profile)
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a failed section fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Transport,
    Status,
    Malformed,
    InvalidRequest,
}

/// Structured error for one section fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            kind: SourceErrorKind::Status,
            message: format!("upstream returned status {status}"),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Malformed,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::Status => "source.status",
            SourceErrorKind::Malformed => "source.malformed",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Parse a section body and check it has the expected JSON shape.
pub fn parse_section(section: Section, body: &str) -> Result<serde_json::Value, SourceError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| SourceError::malformed(format!("{section} payload is not JSON: {e}")))?;

    let shape_ok = if section.expects_list() {
        value.is_array()
    } else {
        value.is_object()
    };
    if !shape_ok {
        let expected = if section.expects_list() { "a list" } else { "an object" };
        return Err(SourceError::malformed(format!(
            "{section} payload is not {expected}"
        )));
    }

    Ok(value)
}

/// Provider of raw per-ticker payloads.
///
/// Implementations fetch the four sections independently and substitute
/// `Value::Null` for any that fail, logging the reason.
pub trait PayloadSource: Send + Sync {
    fn fetch<'a>(
        &'a self,
        symbol: &'a Symbol,
        as_of: ProcessingDate,
    ) -> Pin<Box<dyn Future<Output = RawPayloads> + Send + 'a>>;
}
