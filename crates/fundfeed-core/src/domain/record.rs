use serde::{Deserialize, Serialize};

/// Currency every dashboard figure is quoted in.
pub const REPORTING_CURRENCY: &str = "USD";

/// Description used when the profile payload carries none.
pub const MISSING_DESCRIPTION: &str = "No description available";

/// Final per-ticker output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TickerRecord {
    pub profile: TickerProfile,
    pub stats: TickerStats,
    pub financials: Financials,
    pub history: Vec<HistoryPoint>,
}

/// Company identity plus the latest traded price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TickerProfile {
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub current_price: f64,
    pub currency: String,
}

/// Valuation statistics from the latest daily fundamentals record.
///
/// Unlike every other numeric output these stay `null` when upstream has no
/// value, so the dashboard can tell "unknown" from zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerStats {
    pub market_cap: Option<f64>,
    pub pe: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub beta: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub roe: Option<f64>,
    pub eps: Option<f64>,
}

/// One reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetric {
    pub date: String,
    pub period: String,
    pub revenue: f64,
    pub net_income: f64,
    pub eps: f64,
    pub free_cash_flow: f64,
    pub gross_margin: f64,
    pub operating_margin: f64,
    pub net_margin: f64,
    pub total_assets: f64,
    pub total_equity: f64,
    pub total_liabilities: f64,
    pub long_term_debt: f64,
}

impl FinancialMetric {
    /// Upstream emits placeholder periods with nothing filled in.
    pub fn is_placeholder(&self) -> bool {
        self.revenue == 0.0 && self.eps == 0.0
    }
}

/// Statement periods split by cadence, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Financials {
    pub annual: Vec<FinancialMetric>,
    pub quarterly: Vec<FinancialMetric>,
}

/// Daily closing price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: String,
    pub price: f64,
}
