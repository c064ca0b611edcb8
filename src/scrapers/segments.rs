//! Segment query descriptors
//!
//! Every upstream fetch is one scanner POST; the bodies here are the only
//! query shaping the service does. All segments request the same column
//! list so the row parser stays positional-stable across markets.

use serde_json::{json, Value};

use crate::models::InstrumentKind;

/// Columns requested from the scanner, in positional order.
pub const SCAN_COLUMNS: [&str; 10] = [
    "name",
    "description",
    "close",
    "change",
    "high|1d",
    "low|1d",
    "type",
    "subtype",
    "market_cap_basic",
    "logoid",
];

/// Logical upstream grouping a scan belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Domestic,
    Foreign,
    CurrencyFeed,
}

/// One scanner query: market path, request body and owning segment.
#[derive(Debug, Clone)]
pub struct SegmentQuery {
    pub name: &'static str,
    pub segment: Segment,
    pub market: &'static str,
    pub body: Value,
}

/// One fixed currency/metal feed entry.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyEntry {
    pub ticker: &'static str,
    pub id: &'static str,
    pub display_name: &'static str,
    pub kind: InstrumentKind,
}

/// The currency/metal feed universe. Rates are quoted against TRY except
/// the ounce gold quote, which is USD-priced and feeds the gram derivation.
pub const CURRENCY_TABLE: [CurrencyEntry; 4] = [
    CurrencyEntry {
        ticker: "FX_IDC:USDTRY",
        id: "USD",
        display_name: "Dolar",
        kind: InstrumentKind::Currency,
    },
    CurrencyEntry {
        ticker: "FX_IDC:EURTRY",
        id: "EUR",
        display_name: "Euro",
        kind: InstrumentKind::Currency,
    },
    CurrencyEntry {
        ticker: "FX_IDC:GBPTRY",
        id: "GBP",
        display_name: "Sterlin",
        kind: InstrumentKind::Currency,
    },
    CurrencyEntry {
        ticker: "OANDA:XAUUSD",
        id: "ONS",
        display_name: "Ons Altın",
        kind: InstrumentKind::Metal,
    },
];

pub fn currency_entry(ticker: &str) -> Option<&'static CurrencyEntry> {
    CURRENCY_TABLE.iter().find(|entry| entry.ticker == ticker)
}

/// Full BIST equity board: common stocks only, sorted by symbol.
pub fn bist_equities(limit: usize) -> SegmentQuery {
    SegmentQuery {
        name: "bist_equities",
        segment: Segment::Domestic,
        market: "turkey",
        body: json!({
            "filter": [
                {"left": "exchange", "operation": "equal", "right": "BIST"},
                {"left": "typespecs", "operation": "has", "right": "common"},
            ],
            "options": {"lang": "tr"},
            "symbols": {"query": {"types": []}, "tickers": []},
            "columns": SCAN_COLUMNS,
            "sort": {"sortBy": "name", "sortOrder": "asc"},
            "range": [0, limit],
        }),
    }
}

/// Broad scan of BIST-listed funds and structured products.
pub fn fund_scan(limit: usize) -> SegmentQuery {
    SegmentQuery {
        name: "fund_scan",
        segment: Segment::Domestic,
        market: "turkey",
        body: json!({
            "filter": [
                {"left": "exchange", "operation": "equal", "right": "BIST"},
                {"left": "type", "operation": "in_range", "right": ["fund", "structured"]},
            ],
            "options": {"lang": "tr"},
            "symbols": {"query": {"types": []}, "tickers": []},
            "columns": SCAN_COLUMNS,
            "sort": {"sortBy": "name", "sortOrder": "asc"},
            "range": [0, limit],
        }),
    }
}

/// Curated fund allow-list, fetched by explicit ticker. The broad scan
/// misses some listed funds; the deduplicator unions both lists.
pub fn fund_targets(tickers: &[String]) -> SegmentQuery {
    SegmentQuery {
        name: "fund_targets",
        segment: Segment::Domestic,
        market: "turkey",
        body: json!({
            "options": {"lang": "tr"},
            "symbols": {"tickers": tickers, "query": {"types": []}},
            "columns": SCAN_COLUMNS,
        }),
    }
}

/// Top US-market instruments by market cap.
pub fn foreign(limit: usize) -> SegmentQuery {
    SegmentQuery {
        name: "foreign",
        segment: Segment::Foreign,
        market: "america",
        body: json!({
            "filter": [
                {"left": "type", "operation": "in_range", "right": ["stock", "fund"]},
            ],
            "options": {"lang": "en"},
            "symbols": {"query": {"types": []}, "tickers": []},
            "columns": SCAN_COLUMNS,
            "sort": {"sortBy": "market_cap_basic", "sortOrder": "desc"},
            "range": [0, limit],
        }),
    }
}

/// Fixed ticker set for the currency/metal feed.
pub fn currency_feed() -> SegmentQuery {
    let tickers: Vec<&str> = CURRENCY_TABLE.iter().map(|entry| entry.ticker).collect();
    SegmentQuery {
        name: "currency_feed",
        segment: Segment::CurrencyFeed,
        market: "forex",
        body: json!({
            "options": {"lang": "tr"},
            "symbols": {"tickers": tickers, "query": {"types": []}},
            "columns": SCAN_COLUMNS,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_query_requests_the_shared_columns() {
        let queries = [
            bist_equities(600),
            fund_scan(600),
            fund_targets(&["BIST:ZPX30".to_string()]),
            foreign(100),
            currency_feed(),
        ];

        for query in queries {
            let columns = query.body["columns"].as_array().unwrap();
            assert_eq!(columns.len(), SCAN_COLUMNS.len(), "{}", query.name);
            assert_eq!(columns[0], "name", "{}", query.name);
        }
    }

    #[test]
    fn scan_range_uses_the_configured_limit() {
        let query = bist_equities(250);
        assert_eq!(query.body["range"][1], 250);

        let query = foreign(40);
        assert_eq!(query.body["range"][1], 40);
    }

    #[test]
    fn currency_feed_covers_the_fixed_table() {
        let query = currency_feed();
        let tickers = query.body["symbols"]["tickers"].as_array().unwrap();
        assert_eq!(tickers.len(), CURRENCY_TABLE.len());
        assert!(tickers.iter().any(|t| *t == "OANDA:XAUUSD"));
    }

    #[test]
    fn currency_entry_lookup_is_exact() {
        assert_eq!(currency_entry("FX_IDC:USDTRY").unwrap().id, "USD");
        assert!(currency_entry("FX_IDC:JPYTRY").is_none());
    }
}
