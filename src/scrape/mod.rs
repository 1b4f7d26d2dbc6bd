pub mod detail;
pub mod enrich;
pub mod fetch;
pub mod listing;

pub use enrich::EnrichmentScheduler;
pub use fetch::PageFetcher;
