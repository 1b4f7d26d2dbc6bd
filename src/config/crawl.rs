use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use std::time::Duration;

pub const BASE_URL: &str = "https://www.careers360.com";

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_CONCURRENCY: usize = 10;

/// Jitter slept before each enrichment task's fetches, in milliseconds.
pub const JITTER_MS: (u64, u64) = (500, 1000);

/// One listing page to crawl: its category label, URL and the structural
/// selector that matches institution cards on that page.
#[derive(Debug, Clone)]
pub struct DomainTarget {
    pub label: String,
    pub listing_url: String,
    pub card_selector: String,
}

impl DomainTarget {
    pub fn new(label: &str, listing_url: &str, card_selector: &str) -> Self {
        Self {
            label: label.to_string(),
            listing_url: listing_url.to_string(),
            card_selector: card_selector.to_string(),
        }
    }
}

pub fn default_targets() -> Vec<DomainTarget> {
    [
        ("Engineering", "https://engineering.careers360.com/colleges/ranking"),
        ("Medical", "https://medicine.careers360.com/colleges/ranking"),
        ("University", "https://university.careers360.com/colleges/ranking"),
        ("MBA", "https://bschool.careers360.com/colleges/ranking"),
        ("Law", "https://law.careers360.com/colleges/ranking"),
    ]
    .iter()
    .map(|(label, url)| DomainTarget::new(label, url, "div.card_block"))
    .collect()
}

/// Immutable crawl settings handed to the fetcher and scheduler at
/// construction. Tests swap in mock-server targets and zero jitter.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub jitter_ms: (u64, u64),
    pub targets: Vec<DomainTarget>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            jitter_ms: JITTER_MS,
            targets: default_targets(),
        }
    }
}

impl Validate for CrawlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("user_agent", &self.user_agent)?;
        for target in &self.targets {
            validate_url("listing_url", &target.listing_url)?;
            validate_non_empty_string("card_selector", &target.card_selector)?;
        }
        Ok(())
    }
}
