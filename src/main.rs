//! piyasa - market data aggregation service
//!
//! Fans out to every upstream market segment concurrently, reconciles the
//! results into one canonical instrument collection and serves it over HTTP
//! for the mobile app.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use piyasa_backend::aggregation::logos::{LogoBook, LogoResolver};
use piyasa_backend::aggregation::Aggregator;
use piyasa_backend::api::create_router;
use piyasa_backend::models::Config;
use piyasa_backend::scrapers::ScannerClient;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let config = Config::from_env()?;
    info!("🚀 piyasa-backend starting");

    // An explicit asset override must parse; a broken deployment should
    // fail at startup, not serve logoless responses for weeks.
    let book = match &config.logos_path {
        Some(path) => LogoBook::load(path)
            .with_context(|| format!("failed to load logo asset from {path}"))?,
        None => LogoBook::embedded(),
    };

    let client = ScannerClient::new(Duration::from_secs(config.source_timeout_secs))
        .context("failed to build scanner client")?;

    let aggregator = Arc::new(Aggregator::new(
        Arc::new(client),
        LogoResolver::new(book),
        &config,
    ));

    let app = create_router(aggregator);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
