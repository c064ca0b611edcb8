pub mod segments;
pub mod tradingview; // Scanner client shared by every market segment

pub use segments::{Segment, SegmentQuery};
pub use tradingview::{MarketFeed, ScannerClient, ScannerRow, SourceError};
