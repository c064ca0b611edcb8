//! Derived gram gold quote.
//!
//! No upstream serves a gram-denominated gold price directly; it is
//! computed from the USD ounce quote and the USD/TRY rate. The ±1% high/low
//! band is a synthetic approximation, not a measured range, and the daily
//! change is inherited from the ounce quote.

use crate::models::{Instrument, InstrumentKind, Region};

/// Grams per troy ounce.
const GRAMS_PER_OUNCE: f64 = 31.1035;
/// Synthetic intraday band applied to the derived price.
const SYNTHETIC_BAND: f64 = 0.01;

/// Currency-feed ids the derivation depends on.
const OUNCE_ID: &str = "ONS";
const USD_ID: &str = "USD";

/// Compute the gram gold instrument from the settled currency segment.
///
/// Returns `None` when either the ounce quote or the USD/TRY rate is
/// missing, in which case the cycle simply omits the derived entry.
pub fn gram_gold(currencies: &[Instrument]) -> Option<Instrument> {
    let ons = currencies.iter().find(|i| i.id == OUNCE_ID)?;
    let usd = currencies.iter().find(|i| i.id == USD_ID)?;

    let price = ons.price * usd.price / GRAMS_PER_OUNCE;
    Some(Instrument {
        id: "GRAM".to_string(),
        symbol: "GRAM".to_string(),
        name: "Gram Altın".to_string(),
        kind: InstrumentKind::Metal,
        region: Region::Global,
        price,
        change24h: ons.change24h,
        high24: price * (1.0 + SYNTHETIC_BAND),
        low24: price * (1.0 - SYNTHETIC_BAND),
        mcap: 0.0,
        icon: InstrumentKind::Metal.icon().to_string(),
        color: InstrumentKind::Metal.color().to_string(),
        image: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(id: &str, name: &str, kind: InstrumentKind, price: f64, change: f64) -> Instrument {
        Instrument {
            id: id.to_string(),
            symbol: id.to_string(),
            name: name.to_string(),
            kind,
            region: Region::Global,
            price,
            change24h: change,
            high24: price,
            low24: price,
            mcap: 0.0,
            icon: kind.icon().to_string(),
            color: kind.color().to_string(),
            image: None,
        }
    }

    #[test]
    fn gram_price_follows_the_ounce_conversion() {
        let currencies = vec![
            quote("USD", "Dolar", InstrumentKind::Currency, 32.0, 0.2),
            quote("ONS", "Ons Altın", InstrumentKind::Metal, 2000.0, -0.8),
        ];

        let gram = gram_gold(&currencies).unwrap();
        assert!((gram.price - 2057.6).abs() < 0.1);
        assert!((gram.high24 - gram.price * 1.01).abs() < 1e-9);
        assert!((gram.low24 - gram.price * 0.99).abs() < 1e-9);
        assert_eq!(gram.change24h, -0.8);
        assert_eq!(gram.id, "GRAM");
        assert_eq!(gram.kind, InstrumentKind::Metal);
    }

    #[test]
    fn missing_ounce_quote_yields_none() {
        let currencies = vec![quote("USD", "Dolar", InstrumentKind::Currency, 32.0, 0.2)];
        assert!(gram_gold(&currencies).is_none());
    }

    #[test]
    fn missing_usd_rate_yields_none() {
        let currencies = vec![quote("ONS", "Ons Altın", InstrumentKind::Metal, 2000.0, -0.8)];
        assert!(gram_gold(&currencies).is_none());
    }

    #[test]
    fn empty_segment_yields_none() {
        assert!(gram_gold(&[]).is_none());
    }
}
