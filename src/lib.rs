//! piyasa-backend library
//!
//! Exposes the aggregation pipeline, scanner adapters and HTTP surface for
//! the binary and the integration tests.

pub mod aggregation;
pub mod api;
pub mod models;
pub mod scrapers;
