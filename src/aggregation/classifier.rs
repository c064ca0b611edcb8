//! Instrument classification
//!
//! Upstream type/subtype tagging is inconsistent across BIST listings:
//! some funds carry no usable type tag at all. Rule order matters and the
//! first match wins. The 3-letter-code + "FON" description fallback is a
//! best-effort heuristic for untagged funds and can misread codes that
//! coincidentally match; product has not signed off on changing it.

use crate::models::InstrumentKind;
use crate::scrapers::segments::{currency_entry, Segment};
use crate::scrapers::ScannerRow;

/// Upstream type tags that always mean a listed fund.
const FUND_TYPES: [&str; 3] = ["fund", "etf", "structured"];
/// Upstream subtype tags that always mean a listed fund.
const FUND_SUBTYPES: [&str; 2] = ["etf", "mutual"];
/// Description token marking Turkish mutual funds.
const FUND_MARKER: &str = "FON";

/// Assign an instrument kind, or `None` to drop the record.
pub fn classify(row: &ScannerRow, segment: Segment) -> Option<InstrumentKind> {
    // Rule 1: the currency/metal feed is a closed universe.
    if segment == Segment::CurrencyFeed {
        return currency_entry(&row.ticker).map(|entry| entry.kind);
    }

    // Rule 2: plainly tagged common stock.
    if row.kind_tag == "stock" && row.subtype == "common" {
        return Some(match segment {
            Segment::Foreign => InstrumentKind::EquityForeign,
            _ => InstrumentKind::Equity,
        });
    }

    // Rule 3: tagged funds, plus the untagged-fund fallback.
    let looks_like_fund = FUND_TYPES.contains(&row.kind_tag.as_str())
        || FUND_SUBTYPES.contains(&row.subtype.as_str())
        || (row.name.chars().count() == 3 && row.description.to_uppercase().contains(FUND_MARKER));
    if looks_like_fund {
        return Some(match segment {
            Segment::Foreign => InstrumentKind::FundForeign,
            _ => InstrumentKind::Fund,
        });
    }

    None
}
