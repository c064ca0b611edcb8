//! Aggregation orchestrator
//!
//! One request is one fully isolated cycle: fan out every segment scan
//! concurrently, contain per-segment failures, then merge into the fixed
//! output order. There is no cross-request state, so no locking either.

use std::sync::Arc;

use tracing::{info, warn};

use crate::aggregation::logos::LogoResolver;
use crate::aggregation::{classifier, dedup, derived, normalizer};
use crate::models::{Config, Instrument};
use crate::scrapers::segments::{self, SegmentQuery};
use crate::scrapers::{MarketFeed, ScannerRow};

pub struct Aggregator {
    feed: Arc<dyn MarketFeed>,
    logos: LogoResolver,
    scan_limit: usize,
    foreign_limit: usize,
    fund_tickers: Vec<String>,
}

impl Aggregator {
    pub fn new(feed: Arc<dyn MarketFeed>, logos: LogoResolver, config: &Config) -> Self {
        Self {
            feed,
            logos,
            scan_limit: config.scan_limit,
            foreign_limit: config.foreign_limit,
            fund_tickers: config.fund_tickers.clone(),
        }
    }

    /// Run one aggregation cycle and return the final ordered collection.
    ///
    /// Output order is fixed regardless of upstream completion order:
    /// currencies and metals, then domestic funds, then domestic equities,
    /// then foreign instruments. The app relies on it for list grouping.
    pub async fn collect_all(&self) -> Vec<Instrument> {
        // Fan out: every segment concurrently. A failed segment contributes
        // zero records; its siblings are unaffected.
        let (currencies, fund_targets, fund_scan, equities, foreign) = tokio::join!(
            self.fetch(segments::currency_feed()),
            self.fetch(segments::fund_targets(&self.fund_tickers)),
            self.fetch(segments::fund_scan(self.scan_limit)),
            self.fetch(segments::bist_equities(self.scan_limit)),
            self.fetch(segments::foreign(self.foreign_limit)),
        );

        // The gram gold quote derives from the settled currency segment.
        let mut currencies = self.pipeline(currencies);
        match derived::gram_gold(&currencies) {
            Some(mut gram) => {
                gram.image = self.logos.resolve(&gram.id, gram.kind, None);
                currencies.push(gram);
            }
            None => warn!("Gram gold skipped: ounce or USD/TRY quote missing"),
        }

        // Funds arrive from two overlapping lists; the broad scan is the
        // more current one and wins on conflicts.
        let funds = dedup::merge(vec![self.pipeline(fund_targets), self.pipeline(fund_scan)]);
        let equities = self.pipeline(equities);
        let foreign = self.pipeline(foreign);

        info!(
            currencies = currencies.len(),
            funds = funds.len(),
            equities = equities.len(),
            foreign = foreign.len(),
            "Aggregation cycle complete"
        );

        let mut all = currencies;
        all.extend(funds);
        all.extend(equities);
        all.extend(foreign);

        // Final pass guarantees id uniqueness across segments.
        dedup::merge(vec![all])
    }

    /// Domestic equity board only (the app's original list view).
    pub async fn collect_bist(&self) -> Vec<Instrument> {
        let rows = self.fetch(segments::bist_equities(self.scan_limit)).await;
        self.pipeline(rows)
    }

    async fn fetch(&self, query: SegmentQuery) -> Vec<ScannerRow> {
        match self.feed.fetch(&query).await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(segment = query.name, %error, "Segment failed, contributing zero records");
                Vec::new()
            }
        }
    }

    /// Classify, normalize and resolve logos for one segment's rows.
    fn pipeline(&self, rows: Vec<ScannerRow>) -> Vec<Instrument> {
        rows.iter()
            .filter_map(|row| {
                let kind = classifier::classify(row, row.segment)?;
                let mut instrument = normalizer::normalize(row, kind);
                instrument.image = self.logos.resolve(&instrument.id, kind, row.logoid.as_deref());
                Some(instrument)
            })
            .collect()
    }
}
