//! Logo resolution
//!
//! All lookup tables live in one TOML asset loaded once at startup;
//! resolution itself is pure, never blocks and never fails. An instrument
//! without a match simply ships without an image and the app renders a
//! textual placeholder.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::models::InstrumentKind;

/// Embedded default asset; deployments can point `LOGOS_PATH` elsewhere.
const DEFAULT_ASSET: &str = include_str!("../../config/logos.toml");

/// Immutable logo lookup tables.
#[derive(Debug, Clone, Deserialize)]
pub struct LogoBook {
    /// Image-proxy URL template; `{logoid}` is substituted verbatim.
    proxy_template: String,
    /// Curated per-symbol exceptions, checked first.
    #[serde(default)]
    overrides: HashMap<String, String>,
    /// Fund issuer logos keyed by the code's first letter.
    #[serde(default)]
    issuers: HashMap<String, String>,
}

impl LogoBook {
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// The asset compiled into the binary.
    pub fn embedded() -> Self {
        Self::from_toml(DEFAULT_ASSET).expect("embedded logo asset is valid")
    }
}

/// Tiered logo lookup over an immutable [`LogoBook`].
pub struct LogoResolver {
    book: LogoBook,
}

impl LogoResolver {
    pub fn new(book: LogoBook) -> Self {
        Self { book }
    }

    /// Ordered fallback chain; the first tier that matches wins.
    ///
    /// 1. curated per-symbol override;
    /// 2. funds only: issuer table keyed by the code's first letter;
    /// 3. upstream logoid through the image-proxy template;
    /// 4. no match.
    pub fn resolve(
        &self,
        id: &str,
        kind: InstrumentKind,
        logoid: Option<&str>,
    ) -> Option<String> {
        if let Some(url) = self.book.overrides.get(id) {
            return Some(url.clone());
        }

        if kind.is_fund() {
            if let Some(initial) = id.chars().next() {
                if let Some(url) = self.book.issuers.get(&initial.to_string()) {
                    return Some(url.clone());
                }
            }
        }

        logoid.map(|logoid| self.book.proxy_template.replace("{logoid}", logoid))
    }
}
