pub mod classifier;
pub mod dedup;
pub mod derived;
pub mod logos;
pub mod normalizer;
pub mod service;

pub use service::Aggregator;
