use serde::{Deserialize, Serialize};

/// Classified instrument category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstrumentKind {
    Equity,
    Fund,
    EquityForeign,
    FundForeign,
    Currency,
    Metal,
}

impl InstrumentKind {
    /// Presentation icon, fixed per kind.
    pub const fn icon(self) -> &'static str {
        match self {
            InstrumentKind::Equity | InstrumentKind::EquityForeign => "finance",
            InstrumentKind::Fund | InstrumentKind::FundForeign => "chart-donut",
            InstrumentKind::Currency => "currency-usd",
            InstrumentKind::Metal => "gold",
        }
    }

    /// Presentation color, fixed per kind.
    pub const fn color(self) -> &'static str {
        match self {
            InstrumentKind::Equity => "#34495E",
            InstrumentKind::EquityForeign => "#2C3E50",
            InstrumentKind::Fund => "#8E44AD",
            InstrumentKind::FundForeign => "#16A085",
            InstrumentKind::Currency => "#27AE60",
            InstrumentKind::Metal => "#F1C40F",
        }
    }

    pub const fn is_fund(self) -> bool {
        matches!(self, InstrumentKind::Fund | InstrumentKind::FundForeign)
    }
}

/// Market region an instrument belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Domestic,
    Foreign,
    Global,
}

/// One canonical quotable entity in the aggregated output.
///
/// Field names follow the app's wire contract: `kind` serializes as `type`,
/// market cap as `mcap`, and `image` is omitted entirely when no logo
/// resolved. Immutable after normalization except for `image` attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InstrumentKind,
    pub region: Region,
    pub price: f64,
    pub change24h: f64,
    pub high24: f64,
    pub low24: f64,
    pub mcap: f64,
    pub icon: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Curated fund tickers the broad scan is known to miss.
const DEFAULT_FUND_TICKERS: [&str; 6] = [
    "BIST:ZPX30",
    "BIST:Z30EA",
    "BIST:ZGOLD",
    "BIST:GLDTR",
    "BIST:ZPLIB",
    "BIST:DJIST",
];

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub source_timeout_secs: u64,
    pub scan_limit: usize,
    pub foreign_limit: usize,
    pub fund_tickers: Vec<String>,
    pub logos_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            source_timeout_secs: 10,
            scan_limit: 600,
            foreign_limit: 100,
            fund_tickers: DEFAULT_FUND_TICKERS.iter().map(|s| s.to_string()).collect(),
            logos_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let defaults = Self::default();

        let fund_tickers = match std::env::var("FUND_TICKERS") {
            Ok(raw) => {
                let tickers: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if tickers.is_empty() {
                    defaults.fund_tickers.clone()
                } else {
                    tickers
                }
            }
            Err(_) => defaults.fund_tickers.clone(),
        };

        Ok(Self {
            port: parse_or_default(std::env::var("PORT").ok(), defaults.port, "PORT"),
            source_timeout_secs: parse_or_default(
                std::env::var("SOURCE_TIMEOUT_SECS").ok(),
                defaults.source_timeout_secs,
                "SOURCE_TIMEOUT_SECS",
            ),
            scan_limit: parse_or_default(
                std::env::var("SCAN_LIMIT").ok(),
                defaults.scan_limit,
                "SCAN_LIMIT",
            ),
            foreign_limit: parse_or_default(
                std::env::var("FOREIGN_LIMIT").ok(),
                defaults.foreign_limit,
                "FOREIGN_LIMIT",
            ),
            fund_tickers,
            logos_path: std::env::var("LOGOS_PATH").ok(),
        })
    }
}

fn parse_or_default<T>(raw: Option<String>, default: T, key: &'static str) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match raw {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, raw = %raw, default = %default, "Invalid value, using default");
                default
            }
        },
    }
}
