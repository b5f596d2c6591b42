//! Mapping from raw Tiingo payloads to the dashboard schema.
//!
//! Everything here is pure and infallible: any payload that is missing or has
//! the wrong shape degrades to an empty section instead of failing the
//! ticker.
//!
//! # Field chains
//!
//! Several output fields can be reported under more than one upstream key.
//! Each is declared as a [`FieldChain`], an ordered list of candidate keys.
//! The first candidate holding a non-zero number wins; if none does, the
//! field is `0`.
//!
//! | Output | Candidates |
//! |--------|------------|
//! | `revenue` | `totalRevenue`, `revenue` |
//! | `eps` | `epsDiluted`, `epsBasic` |
//! | `operatingMargin` | `operatingMargin`, `opMargin` |
//! | `totalEquity` | `totalEquity`, `totalStockholderEquity` |
//! | `netMargin` | `profitMargin` |
//! | history `price` | `adjClose`, `close` |

use serde_json::{Map, Value};

use crate::domain::{
    date_portion, FinancialMetric, Financials, HistoryPoint, ProcessingDate, Symbol,
    TickerProfile, TickerRecord, TickerStats, MISSING_DESCRIPTION, REPORTING_CURRENCY,
};

/// The four upstream payloads for one ticker, exactly as received.
///
/// A section whose fetch failed is `Value::Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPayloads {
    pub profile: Value,
    pub stats: Value,
    pub statements: Value,
    pub prices: Value,
}

/// Ordered candidate keys for one numeric output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldChain {
    pub field: &'static str,
    pub keys: &'static [&'static str],
}

impl FieldChain {
    pub const fn new(field: &'static str, keys: &'static [&'static str]) -> Self {
        Self { field, keys }
    }

    /// First non-zero candidate, else 0.
    pub fn resolve<L: NumericLookup + ?Sized>(&self, source: &L) -> f64 {
        self.keys
            .iter()
            .filter_map(|key| source.number(key))
            .find(|value| *value != 0.0)
            .unwrap_or(0.0)
    }
}

pub const REVENUE: FieldChain = FieldChain::new("revenue", &["totalRevenue", "revenue"]);
pub const NET_INCOME: FieldChain = FieldChain::new("netIncome", &["netIncome"]);
pub const EPS: FieldChain = FieldChain::new("eps", &["epsDiluted", "epsBasic"]);
pub const FREE_CASH_FLOW: FieldChain = FieldChain::new("freeCashFlow", &["freeCashFlow"]);
pub const GROSS_MARGIN: FieldChain = FieldChain::new("grossMargin", &["grossMargin"]);
pub const OPERATING_MARGIN: FieldChain =
    FieldChain::new("operatingMargin", &["operatingMargin", "opMargin"]);
pub const NET_MARGIN: FieldChain = FieldChain::new("netMargin", &["profitMargin"]);
pub const TOTAL_ASSETS: FieldChain = FieldChain::new("totalAssets", &["totalAssets"]);
pub const TOTAL_EQUITY: FieldChain =
    FieldChain::new("totalEquity", &["totalEquity", "totalStockholderEquity"]);
pub const TOTAL_LIABILITIES: FieldChain =
    FieldChain::new("totalLiabilities", &["totalLiabilities"]);
pub const LONG_TERM_DEBT: FieldChain = FieldChain::new("longTermDebt", &["longTermDebt"]);
pub const PRICE: FieldChain = FieldChain::new("price", &["adjClose", "close"]);

/// Keyed numeric access over a loosely typed payload.
pub trait NumericLookup {
    fn number(&self, key: &str) -> Option<f64>;
}

impl NumericLookup for Map<String, Value> {
    fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(as_number)
    }
}

/// `statementData` of one statement record.
///
/// Accepts a flat `{key: number}` object, or the grouped form where each
/// value is a list of `{dataCode, value}` entries (`incomeStatement`,
/// `balanceSheet`, `cashFlow`, `overview`).
#[derive(Debug, Clone, Copy)]
pub struct StatementData<'a>(Option<&'a Map<String, Value>>);

impl<'a> StatementData<'a> {
    pub fn new(statement: &'a Value) -> Self {
        Self(statement.get("statementData").and_then(Value::as_object))
    }
}

impl NumericLookup for StatementData<'_> {
    fn number(&self, key: &str) -> Option<f64> {
        let data = self.0?;
        if let Some(value) = data.get(key) {
            return as_number(value);
        }

        data.values()
            .filter_map(Value::as_array)
            .flatten()
            .find(|entry| entry.get("dataCode").and_then(Value::as_str) == Some(key))
            .and_then(|entry| entry.get("value"))
            .and_then(as_number)
    }
}

/// Build the output record for one ticker.
///
/// `symbol` is the requested ticker; it fills in identity fields the profile
/// payload lacks. `as_of` is the processing date used to drop projected
/// statement periods.
pub fn normalize(symbol: &Symbol, payloads: &RawPayloads, as_of: ProcessingDate) -> TickerRecord {
    let history = normalize_history(&payloads.prices);
    let current_price = history.last().map_or(0.0, |point| point.price);

    TickerRecord {
        profile: normalize_profile(symbol, &payloads.profile, current_price),
        stats: normalize_stats(&payloads.stats),
        financials: normalize_financials(&payloads.statements, as_of),
        history,
    }
}

pub fn normalize_profile(symbol: &Symbol, profile: &Value, current_price: f64) -> TickerProfile {
    let profile = profile.as_object();

    TickerProfile {
        symbol: text_field(profile, "ticker").unwrap_or_else(|| symbol.as_str().to_owned()),
        name: text_field(profile, "name").unwrap_or_else(|| symbol.as_str().to_owned()),
        description: text_field(profile, "description")
            .unwrap_or_else(|| String::from(MISSING_DESCRIPTION)),
        sector: text_field(profile, "sector"),
        industry: text_field(profile, "industry"),
        current_price,
        currency: String::from(REPORTING_CURRENCY),
    }
}

/// Stats come from the first (latest) record; missing values stay `None`.
pub fn normalize_stats(stats: &Value) -> TickerStats {
    let Some(latest) = stats
        .as_array()
        .and_then(|records| records.first())
        .and_then(Value::as_object)
    else {
        return TickerStats::default();
    };

    TickerStats {
        market_cap: latest.number("marketCap"),
        pe: latest.number("peRatio"),
        dividend_yield: latest.number("dividendYield"),
        beta: latest.number("beta"),
        fifty_two_week_high: latest.number("high52Week"),
        fifty_two_week_low: latest.number("low52Week"),
        roe: latest.number("roe"),
        eps: latest.number("eps"),
    }
}

/// Split statement records into annual and quarterly periods.
///
/// Records arrive newest first and keep that order. A record is skipped when
/// it has no readable date, is dated after `as_of`, or has neither revenue
/// nor EPS.
pub fn normalize_financials(statements: &Value, as_of: ProcessingDate) -> Financials {
    let mut financials = Financials::default();

    for statement in statements.as_array().into_iter().flatten() {
        let Some(date) = statement
            .get("date")
            .and_then(Value::as_str)
            .and_then(ProcessingDate::parse_leading)
        else {
            continue;
        };
        if date > as_of {
            continue;
        }

        let cadence = Cadence::of(statement);
        let metric = build_metric(statement, date, cadence);
        if metric.is_placeholder() {
            continue;
        }

        match cadence {
            Cadence::Annual => financials.annual.push(metric),
            Cadence::Quarterly(_) => financials.quarterly.push(metric),
        }
    }

    financials
}

/// Daily prices in upstream order; non-object entries are skipped.
pub fn normalize_history(prices: &Value) -> Vec<HistoryPoint> {
    prices
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .map(|bar| HistoryPoint {
            date: bar
                .get("date")
                .and_then(Value::as_str)
                .map(date_portion)
                .unwrap_or_default()
                .to_owned(),
            price: PRICE.resolve(bar),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cadence {
    Annual,
    Quarterly(f64),
}

impl Cadence {
    /// Quarter 0, missing or non-numeric means a full-year record.
    fn of(statement: &Value) -> Self {
        match statement.get("quarter").and_then(as_number) {
            Some(quarter) if quarter != 0.0 => Self::Quarterly(quarter),
            _ => Self::Annual,
        }
    }
}

fn build_metric(statement: &Value, date: ProcessingDate, cadence: Cadence) -> FinancialMetric {
    let data = StatementData::new(statement);
    let year = statement
        .get("year")
        .and_then(as_number)
        .map_or_else(|| date.into_inner().year().to_string(), format_whole);

    let period = match cadence {
        Cadence::Annual => year,
        Cadence::Quarterly(quarter) => format!("{year} Q{}", format_whole(quarter)),
    };

    FinancialMetric {
        date: date.format_iso(),
        period,
        revenue: REVENUE.resolve(&data),
        net_income: NET_INCOME.resolve(&data),
        eps: EPS.resolve(&data),
        free_cash_flow: FREE_CASH_FLOW.resolve(&data),
        gross_margin: GROSS_MARGIN.resolve(&data),
        operating_margin: OPERATING_MARGIN.resolve(&data),
        net_margin: NET_MARGIN.resolve(&data),
        total_assets: TOTAL_ASSETS.resolve(&data),
        total_equity: TOTAL_EQUITY.resolve(&data),
        total_liabilities: TOTAL_LIABILITIES.resolve(&data),
        long_term_debt: LONG_TERM_DEBT.resolve(&data),
    }
}

/// Numbers, or strings holding a finite number.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn text_field(object: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    object?
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

fn format_whole(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
