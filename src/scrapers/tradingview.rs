//! TradingView scanner client
//!
//! The scanner returns rows as positional value arrays matching the
//! requested column list. Rows are converted into named `ScannerRow`
//! records here, at the adapter boundary, so malformed entries are rejected
//! and logged instead of propagating defaulted fields into the pipeline.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::scrapers::segments::{Segment, SegmentQuery, SCAN_COLUMNS};

const SCANNER_BASE: &str = "https://scanner.tradingview.com";

/// Failure taxonomy for one upstream scan.
///
/// All three downgrade to "zero records from this segment" at the fan-out
/// boundary; none of them is ever surfaced to an API caller.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("scan '{segment}' timed out after {seconds}s")]
    Timeout { segment: &'static str, seconds: u64 },
    #[error("scan '{segment}' unavailable: {reason}")]
    Unavailable {
        segment: &'static str,
        reason: String,
    },
    #[error("scan '{segment}' returned a malformed response: {reason}")]
    Malformed {
        segment: &'static str,
        reason: String,
    },
}

/// One validated scanner row, still in upstream vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannerRow {
    /// Exchange-prefixed ticker, e.g. `BIST:THYAO`.
    pub ticker: String,
    pub segment: Segment,
    /// Short symbol as listed, e.g. `THYAO`.
    pub name: String,
    pub description: String,
    pub close: f64,
    pub change: f64,
    pub high: Option<f64>,
    pub low: Option<f64>,
    /// Upstream `type` tag (`stock`, `fund`, ...); empty when untagged.
    pub kind_tag: String,
    /// Upstream `subtype` tag (`common`, `etf`, ...); empty when untagged.
    pub subtype: String,
    pub market_cap: Option<f64>,
    pub logoid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScanResponse {
    #[serde(default)]
    data: Vec<ScanItem>,
}

#[derive(Debug, Deserialize)]
struct ScanItem {
    s: String,
    d: Vec<Value>,
}

// Positional indices into ScanItem::d, matching segments::SCAN_COLUMNS.
const COL_NAME: usize = 0;
const COL_DESCRIPTION: usize = 1;
const COL_CLOSE: usize = 2;
const COL_CHANGE: usize = 3;
const COL_HIGH: usize = 4;
const COL_LOW: usize = 5;
const COL_TYPE: usize = 6;
const COL_SUBTYPE: usize = 7;
const COL_MARKET_CAP: usize = 8;
const COL_LOGOID: usize = 9;

/// Seam between the orchestrator and the scanner transport.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    async fn fetch(&self, query: &SegmentQuery) -> Result<Vec<ScannerRow>, SourceError>;
}

pub struct ScannerClient {
    client: Client,
    source_timeout: Duration,
}

impl ScannerClient {
    pub fn new(source_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(source_timeout)
            .user_agent(concat!("piyasa-backend/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            source_timeout,
        })
    }

    async fn scan(&self, query: &SegmentQuery) -> Result<Vec<ScannerRow>, SourceError> {
        let url = format!("{}/{}/scan", SCANNER_BASE, query.market);

        let send = self.client.post(&url).json(&query.body).send();
        let response = match timeout(self.source_timeout, send).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                return Err(SourceError::Unavailable {
                    segment: query.name,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(SourceError::Timeout {
                    segment: query.name,
                    seconds: self.source_timeout.as_secs(),
                })
            }
        };

        if !response.status().is_success() {
            return Err(SourceError::Unavailable {
                segment: query.name,
                reason: format!("status {}", response.status()),
            });
        }

        let payload: ScanResponse = response.json().await.map_err(|e| SourceError::Malformed {
            segment: query.name,
            reason: e.to_string(),
        })?;

        let total = payload.data.len();
        let mut rows = Vec::with_capacity(total);
        let mut rejected = 0usize;
        for item in payload.data {
            match parse_row(item, query.segment) {
                Ok(row) => rows.push(row),
                Err(reason) => {
                    rejected += 1;
                    debug!(segment = query.name, reason, "Dropping malformed scanner row");
                }
            }
        }
        if rejected > 0 {
            warn!(
                segment = query.name,
                rejected, total, "Rejected malformed rows from scan"
            );
        }
        debug!(segment = query.name, rows = rows.len(), "Scan complete");

        Ok(rows)
    }
}

#[async_trait]
impl MarketFeed for ScannerClient {
    async fn fetch(&self, query: &SegmentQuery) -> Result<Vec<ScannerRow>, SourceError> {
        self.scan(query).await
    }
}

fn parse_row(item: ScanItem, segment: Segment) -> Result<ScannerRow, String> {
    let d = &item.d;
    if d.len() != SCAN_COLUMNS.len() {
        return Err(format!(
            "expected {} columns, got {}",
            SCAN_COLUMNS.len(),
            d.len()
        ));
    }
    if item.s.trim().is_empty() {
        return Err("empty ticker".to_string());
    }

    let name = d[COL_NAME].as_str().ok_or("missing symbol name")?.to_string();
    if name.is_empty() {
        return Err("empty symbol name".to_string());
    }
    let description = d[COL_DESCRIPTION]
        .as_str()
        .ok_or("missing description")?
        .to_string();
    let close = d[COL_CLOSE].as_f64().ok_or("missing close price")?;
    if close < 0.0 {
        return Err(format!("negative close {close}"));
    }
    let change = d[COL_CHANGE].as_f64().ok_or("missing change")?;

    Ok(ScannerRow {
        ticker: item.s,
        segment,
        name,
        description,
        close,
        change,
        high: d[COL_HIGH].as_f64(),
        low: d[COL_LOW].as_f64(),
        kind_tag: d[COL_TYPE].as_str().unwrap_or_default().to_string(),
        subtype: d[COL_SUBTYPE].as_str().unwrap_or_default().to_string(),
        market_cap: d[COL_MARKET_CAP].as_f64(),
        logoid: d[COL_LOGOID]
            .as_str()
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    })
}
