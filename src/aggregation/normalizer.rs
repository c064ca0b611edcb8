//! Field normalization into the canonical instrument shape.
//!
//! Pure mapping only: no classification, no dedup, no I/O. Defaults are
//! exactly the ones the app contract allows: missing high/low fall back to
//! the close price, missing market cap to zero.

use crate::models::{Instrument, InstrumentKind, Region};
use crate::scrapers::segments::{currency_entry, Segment};
use crate::scrapers::ScannerRow;

/// Map one classified row into the canonical shape.
pub fn normalize(row: &ScannerRow, kind: InstrumentKind) -> Instrument {
    if row.segment == Segment::CurrencyFeed {
        if let Some(entry) = currency_entry(&row.ticker) {
            return Instrument {
                id: entry.id.to_string(),
                symbol: entry.id.to_string(),
                name: entry.display_name.to_string(),
                kind,
                region: Region::Global,
                price: row.close,
                change24h: row.change,
                high24: row.high.unwrap_or(row.close),
                low24: row.low.unwrap_or(row.close),
                mcap: 0.0,
                icon: kind.icon().to_string(),
                color: kind.color().to_string(),
                image: None,
            };
        }
    }

    let symbol = strip_exchange_prefix(&row.ticker).to_string();
    let region = match row.segment {
        Segment::Foreign => Region::Foreign,
        _ => Region::Domestic,
    };

    Instrument {
        id: symbol.clone(),
        symbol,
        name: row.description.clone(),
        kind,
        region,
        price: row.close,
        change24h: row.change,
        high24: row.high.unwrap_or(row.close),
        low24: row.low.unwrap_or(row.close),
        mcap: row.market_cap.unwrap_or(0.0),
        icon: kind.icon().to_string(),
        color: kind.color().to_string(),
        image: None,
    }
}

fn strip_exchange_prefix(ticker: &str) -> &str {
    ticker.split_once(':').map_or(ticker, |(_, rest)| rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ScannerRow {
        ScannerRow {
            ticker: "BIST:THYAO".to_string(),
            segment: Segment::Domestic,
            name: "THYAO".to_string(),
            description: "Türk Hava Yolları".to_string(),
            close: 295.5,
            change: 1.35,
            high: Some(298.0),
            low: Some(291.25),
            kind_tag: "stock".to_string(),
            subtype: "common".to_string(),
            market_cap: Some(4.07e11),
            logoid: Some("turkish-airlines".to_string()),
        }
    }

    #[test]
    fn maps_all_declared_fields() {
        let instrument = normalize(&row(), InstrumentKind::Equity);
        assert_eq!(instrument.id, "THYAO");
        assert_eq!(instrument.symbol, "THYAO");
        assert_eq!(instrument.name, "Türk Hava Yolları");
        assert_eq!(instrument.region, Region::Domestic);
        assert_eq!(instrument.price, 295.5);
        assert_eq!(instrument.high24, 298.0);
        assert_eq!(instrument.low24, 291.25);
        assert_eq!(instrument.mcap, 4.07e11);
        assert_eq!(instrument.icon, "finance");
        assert!(instrument.image.is_none());
    }

    #[test]
    fn missing_high_low_fall_back_to_price() {
        let mut bare = row();
        bare.high = None;
        bare.low = None;
        let instrument = normalize(&bare, InstrumentKind::Equity);
        assert_eq!(instrument.high24, 295.5);
        assert_eq!(instrument.low24, 295.5);
    }

    #[test]
    fn missing_market_cap_defaults_to_zero() {
        let mut bare = row();
        bare.market_cap = None;
        let instrument = normalize(&bare, InstrumentKind::Equity);
        assert_eq!(instrument.mcap, 0.0);
    }

    #[test]
    fn foreign_rows_keep_their_region() {
        let mut foreign = row();
        foreign.ticker = "NASDAQ:AAPL".to_string();
        foreign.segment = Segment::Foreign;
        let instrument = normalize(&foreign, InstrumentKind::EquityForeign);
        assert_eq!(instrument.id, "AAPL");
        assert_eq!(instrument.region, Region::Foreign);
    }

    #[test]
    fn currency_rows_use_fixed_ids_and_names() {
        let mut usd = row();
        usd.ticker = "FX_IDC:USDTRY".to_string();
        usd.segment = Segment::CurrencyFeed;
        usd.close = 32.5;
        usd.high = None;
        usd.low = None;
        let instrument = normalize(&usd, InstrumentKind::Currency);
        assert_eq!(instrument.id, "USD");
        assert_eq!(instrument.name, "Dolar");
        assert_eq!(instrument.region, Region::Global);
        assert_eq!(instrument.high24, 32.5);
        assert_eq!(instrument.mcap, 0.0);
    }

    #[test]
    fn prefix_strip_leaves_bare_tickers_alone() {
        assert_eq!(strip_exchange_prefix("BIST:THYAO"), "THYAO");
        assert_eq!(strip_exchange_prefix("THYAO"), "THYAO");
    }
}
