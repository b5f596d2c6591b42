//! # Domain Models
//!
//! Typed shapes shared by the normalizer, the runner and the CLI.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker symbol |
//! | [`ProcessingDate`] | Calendar date a run is processed as of |
//! | [`TickerRecord`] | Output document written per ticker |
//! | [`TickerProfile`] | Company identity and current price |
//! | [`TickerStats`] | Nullable valuation statistics |
//! | [`Financials`] | Annual and quarterly statement periods |
//! | [`FinancialMetric`] | One statement period |
//! | [`HistoryPoint`] | One daily closing price |

mod date;
mod record;
mod symbol;

pub use date::{date_portion, ProcessingDate};
pub use record::{
    FinancialMetric, Financials, HistoryPoint, TickerProfile, TickerRecord, TickerStats,
    MISSING_DESCRIPTION, REPORTING_CURRENCY,
};
pub use symbol::Symbol;
