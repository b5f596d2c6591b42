//! Behavior-driven tests for payload normalization
//!
//! These tests verify HOW raw Tiingo payloads become dashboard records,
//! focusing on fallback chains, period routing, filtering and degradation.

use fundfeed_core::{normalize, ProcessingDate, RawPayloads, Symbol, TickerStats};
use serde_json::{json, Value};

fn as_of() -> ProcessingDate {
    ProcessingDate::parse("2024-06-30").expect("valid date")
}

fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}

fn with_statements(statements: Value) -> RawPayloads {
    RawPayloads {
        statements,
        ..RawPayloads::default()
    }
}

// =============================================================================
// Degradation: malformed or empty sections
// =============================================================================

#[test]
fn when_every_section_is_missing_record_is_fully_defaulted() {
    // Given: Four failed fetches
    let payloads = RawPayloads::default();

    // When: The ticker is normalized
    let record = normalize(&symbol("TSLA"), &payloads, as_of());

    // Then: Every section has its default
    assert_eq!(record.profile.symbol, "TSLA");
    assert_eq!(record.profile.name, "TSLA");
    assert_eq!(record.profile.description, "No description available");
    assert_eq!(record.profile.current_price, 0.0);
    assert_eq!(record.profile.currency, "USD");
    assert_eq!(record.stats, TickerStats::default());
    assert!(record.financials.annual.is_empty());
    assert!(record.financials.quarterly.is_empty());
    assert!(record.history.is_empty());
}

#[test]
fn when_sections_have_wrong_shapes_record_is_still_produced() {
    // Given: Every section carries the wrong JSON type
    let payloads = RawPayloads {
        profile: json!("oops"),
        stats: json!({"detail": "Error"}),
        statements: json!(17),
        prices: json!({"date": "2024-01-01"}),
    };

    // When: The ticker is normalized
    let record = normalize(&symbol("V"), &payloads, as_of());

    // Then: Defaults are used throughout
    assert_eq!(record.profile.symbol, "V");
    assert_eq!(record.stats, TickerStats::default());
    assert!(record.financials.annual.is_empty());
    assert!(record.history.is_empty());
}

#[test]
fn one_malformed_section_does_not_affect_the_others() {
    // Given: A broken statements payload next to valid prices
    let payloads = RawPayloads {
        profile: json!({"ticker": "JPM", "name": "JPMorgan Chase"}),
        stats: Value::Null,
        statements: json!("garbage"),
        prices: json!([{"date": "2024-06-28T00:00:00.000Z", "adjClose": 197.4}]),
    };

    // When: The ticker is normalized
    let record = normalize(&symbol("JPM"), &payloads, as_of());

    // Then: The valid sections are mapped
    assert_eq!(record.profile.name, "JPMorgan Chase");
    assert_eq!(record.profile.current_price, 197.4);
    assert_eq!(record.history.len(), 1);
    assert!(record.financials.annual.is_empty());
}

// =============================================================================
// Field chains
// =============================================================================

#[test]
fn revenue_falls_back_from_total_revenue_to_revenue() {
    let payloads = with_statements(json!([
        {"date": "2024-01-01", "year": 2023, "quarter": 0,
         "statementData": {"totalRevenue": 0, "revenue": 500}}
    ]));

    let record = normalize(&symbol("AAPL"), &payloads, as_of());
    assert_eq!(record.financials.annual[0].revenue, 500.0);
}

#[test]
fn eps_falls_back_from_diluted_to_basic() {
    let payloads = with_statements(json!([
        {"date": "2024-01-01", "year": 2023, "quarter": 0,
         "statementData": {"epsDiluted": 0, "epsBasic": 1.2}}
    ]));

    let record = normalize(&symbol("AAPL"), &payloads, as_of());
    assert_eq!(record.financials.annual[0].eps, 1.2);
}

#[test]
fn margins_and_equity_use_their_alternate_keys() {
    let payloads = with_statements(json!([
        {"date": "2024-03-31", "year": 2024, "quarter": 1,
         "statementData": {
            "revenue": 900, "opMargin": 0.27, "profitMargin": 0.21,
            "totalStockholderEquity": 5000, "grossMargin": 0.44,
            "netIncome": 190, "freeCashFlow": 120, "totalAssets": 9000,
            "totalLiabilities": 4000, "longTermDebt": 1500
         }}
    ]));

    let record = normalize(&symbol("AAPL"), &payloads, as_of());
    let metric = &record.financials.quarterly[0];
    assert_eq!(metric.operating_margin, 0.27);
    assert_eq!(metric.net_margin, 0.21);
    assert_eq!(metric.total_equity, 5000.0);
    assert_eq!(metric.gross_margin, 0.44);
    assert_eq!(metric.net_income, 190.0);
    assert_eq!(metric.free_cash_flow, 120.0);
    assert_eq!(metric.total_assets, 9000.0);
    assert_eq!(metric.total_liabilities, 4000.0);
    assert_eq!(metric.long_term_debt, 1500.0);
    assert_eq!(metric.eps, 0.0);
}

// =============================================================================
// Period routing and filtering
// =============================================================================

#[test]
fn quarter_zero_is_annual_and_quarter_two_is_quarterly() {
    let payloads = with_statements(json!([
        {"date": "2024-03-31", "year": 2024, "quarter": 2,
         "statementData": {"revenue": 100, "epsDiluted": 1}},
        {"date": "2023-12-31", "year": 2023, "quarter": 0,
         "statementData": {"revenue": 400, "epsDiluted": 4}}
    ]));

    let record = normalize(&symbol("AAPL"), &payloads, as_of());

    assert_eq!(record.financials.annual.len(), 1);
    assert_eq!(record.financials.annual[0].revenue, 400.0);
    assert_eq!(record.financials.annual[0].period, "2023");
    assert_eq!(record.financials.quarterly.len(), 1);
    assert_eq!(record.financials.quarterly[0].revenue, 100.0);
    assert_eq!(record.financials.quarterly[0].period, "2024 Q2");
}

#[test]
fn null_and_non_numeric_quarters_route_to_annual() {
    // Given: Statements whose quarter is null or a label rather than a number
    let payloads = with_statements(json!([
        {"date": "2024-06-30T12:00:00Z", "quarter": null,
         "statementData": {"epsBasic": -1}},
        {"date": "2024-03-31", "year": 2024, "quarter": "Q2",
         "statementData": {"revenue": 250}}
    ]));

    // When: The ticker is normalized
    let record = normalize(&symbol("AAPL"), &payloads, as_of());

    // Then: Both land in the annual sequence, labeled by year only
    assert!(record.financials.quarterly.is_empty());
    let periods = record
        .financials
        .annual
        .iter()
        .map(|metric| (metric.date.as_str(), metric.period.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(periods, vec![("2024-06-30", "2024"), ("2024-03-31", "2024")]);
    assert_eq!(record.financials.annual[0].eps, -1.0);
}

#[test]
fn numeric_string_quarter_and_year_route_to_quarterly() {
    // Given: A statement with quarter, year and revenue sent as strings
    let payloads = with_statements(json!([
        {"date": "2024-03-31", "year": "2024", "quarter": "2",
         "statementData": {"revenue": "10"}}
    ]));

    // When: The ticker is normalized
    let record = normalize(&symbol("AAPL"), &payloads, as_of());

    // Then: It is read as a numeric quarter
    assert!(record.financials.annual.is_empty());
    assert_eq!(record.financials.quarterly.len(), 1);
    assert_eq!(record.financials.quarterly[0].period, "2024 Q2");
    assert_eq!(record.financials.quarterly[0].revenue, 10.0);
}

#[test]
fn statements_keep_newest_first_order_within_each_sequence() {
    let payloads = with_statements(json!([
        {"date": "2024-03-31", "year": 2024, "quarter": 1, "statementData": {"revenue": 3}},
        {"date": "2023-12-31", "year": 2023, "quarter": 4, "statementData": {"revenue": 2}},
        {"date": "2023-12-31", "year": 2023, "quarter": 0, "statementData": {"revenue": 9}},
        {"date": "2023-09-30", "year": 2023, "quarter": 3, "statementData": {"revenue": 1}}
    ]));

    let record = normalize(&symbol("AAPL"), &payloads, as_of());
    let quarters = record
        .financials
        .quarterly
        .iter()
        .map(|metric| metric.period.as_str())
        .collect::<Vec<_>>();
    assert_eq!(quarters, vec!["2024 Q1", "2023 Q4", "2023 Q3"]);
}

#[test]
fn placeholder_statement_with_zero_revenue_and_eps_is_dropped() {
    let payloads = with_statements(json!([
        {"date": "2024-03-31", "year": 2024, "quarter": 1,
         "statementData": {"totalRevenue": 0, "epsDiluted": 0, "netIncome": 50}},
        {"date": "2023-12-31", "year": 2023, "quarter": 0,
         "statementData": {}}
    ]));

    let record = normalize(&symbol("AAPL"), &payloads, as_of());
    assert!(record.financials.annual.is_empty());
    assert!(record.financials.quarterly.is_empty());
}

#[test]
fn future_dated_statement_is_dropped() {
    let payloads = with_statements(json!([
        {"date": "2024-09-30", "year": 2024, "quarter": 3,
         "statementData": {"revenue": 1000, "epsDiluted": 2}},
        {"date": "2024-06-29", "year": 2024, "quarter": 2,
         "statementData": {"revenue": 900, "epsDiluted": 1.8}}
    ]));

    let record = normalize(&symbol("AAPL"), &payloads, as_of());
    assert_eq!(record.financials.quarterly.len(), 1);
    assert_eq!(record.financials.quarterly[0].date, "2024-06-29");
}

// =============================================================================
// Statistics
// =============================================================================

#[test]
fn stats_with_non_object_first_entry_are_all_null() {
    // Given: A stats list led by a bare number
    let payloads = RawPayloads {
        stats: json!([5, {"marketCap": 3.0e12, "peRatio": 30.1}]),
        ..RawPayloads::default()
    };

    // When: The ticker is normalized
    let record = normalize(&symbol("AAPL"), &payloads, as_of());

    // Then: Only the first entry is consulted, so every stat is null
    assert_eq!(record.stats, TickerStats::default());
}

#[test]
fn numeric_string_stats_are_read_as_numbers() {
    // Given: Stats values sent as strings, one of them not a number
    let payloads = RawPayloads {
        stats: json!([{"marketCap": "3000000000000", "peRatio": "30.5", "beta": "n/a"}]),
        ..RawPayloads::default()
    };

    // When: The ticker is normalized
    let record = normalize(&symbol("AAPL"), &payloads, as_of());

    // Then: Numeric strings parse and the rest stays null
    assert_eq!(record.stats.market_cap, Some(3_000_000_000_000.0));
    assert_eq!(record.stats.pe, Some(30.5));
    assert_eq!(record.stats.beta, None);
    assert_eq!(record.stats.roe, None);
}

// =============================================================================
// History and current price
// =============================================================================

#[test]
fn history_date_is_truncated_at_time_component() {
    let payloads = RawPayloads {
        prices: json!([{"date": "2023-05-01T00:00:00.000Z", "adjClose": 10}]),
        ..RawPayloads::default()
    };

    let record = normalize(&symbol("AAPL"), &payloads, as_of());
    assert_eq!(record.history[0].date, "2023-05-01");
}

#[test]
fn current_price_is_last_history_entry() {
    let payloads = RawPayloads {
        prices: json!([
            {"date": "2023-01-01", "adjClose": 100},
            {"date": "2023-01-02", "adjClose": 105}
        ]),
        ..RawPayloads::default()
    };

    let record = normalize(&symbol("AAPL"), &payloads, as_of());
    assert_eq!(record.profile.current_price, 105.0);

    let empty = normalize(&symbol("AAPL"), &RawPayloads::default(), as_of());
    assert_eq!(empty.profile.current_price, 0.0);
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn apple_scenario_maps_every_section() {
    // Given: The reference AAPL payloads
    let payloads = RawPayloads {
        profile: json!({"ticker": "AAPL", "name": "Apple"}),
        stats: json!([{"marketCap": 1000, "peRatio": 25}]),
        statements: json!([
            {"date": "2024-01-01", "year": 2023, "quarter": 0,
             "statementData": {"totalRevenue": 1000, "epsDiluted": 5}}
        ]),
        prices: json!([{"date": "2024-01-01T00:00:00Z", "adjClose": 150}]),
    };

    // When: The ticker is normalized
    let record = normalize(&symbol("AAPL"), &payloads, as_of());

    // Then: Every section is mapped
    assert_eq!(record.profile.symbol, "AAPL");
    assert_eq!(record.profile.name, "Apple");
    assert_eq!(record.profile.current_price, 150.0);
    assert_eq!(record.stats.market_cap, Some(1000.0));
    assert_eq!(record.stats.pe, Some(25.0));
    assert_eq!(record.stats.beta, None);
    assert_eq!(record.financials.annual.len(), 1);
    assert_eq!(record.financials.annual[0].revenue, 1000.0);
    assert_eq!(record.financials.annual[0].eps, 5.0);
    assert_eq!(record.financials.annual[0].period, "2023");
    assert!(record.financials.quarterly.is_empty());
    assert_eq!(record.history.len(), 1);
    assert_eq!(record.history[0].date, "2024-01-01");
    assert_eq!(record.history[0].price, 150.0);

    // And: The serialized document uses the dashboard keys
    let document = serde_json::to_value(&record).expect("record serializes");
    assert_eq!(document["Profile"]["Symbol"], json!("AAPL"));
    assert_eq!(document["Stats"]["marketCap"], json!(1000.0));
    assert_eq!(document["Stats"]["dividendYield"], Value::Null);
    assert_eq!(document["Financials"]["Annual"][0]["eps"], json!(5.0));
    assert_eq!(
        document["History"],
        json!([{"date": "2024-01-01", "price": 150.0}])
    );
}
