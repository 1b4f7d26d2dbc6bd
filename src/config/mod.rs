pub mod crawl;
pub mod storage;

pub use crawl::{default_targets, CrawlConfig, DomainTarget};
pub use storage::LocalStorage;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "campusmap")]
#[command(about = "Crawls college listings and exports a cleaned per-course dataset")]
pub struct CliConfig {
    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "10")]
    pub concurrent_requests: usize,

    #[arg(long, help = "Only crawl the named category (e.g. Engineering)")]
    pub domain: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("output_path", &self.output_path)?;
        validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        if let Some(domain) = &self.domain {
            validate_non_empty_string("domain", domain)?;
        }
        Ok(())
    }
}

impl CliConfig {
    /// Crawl settings for this run; `--domain` narrows the target list.
    pub fn crawl_config(&self) -> CrawlConfig {
        let mut crawl = CrawlConfig::default();
        if let Some(domain) = &self.domain {
            crawl
                .targets
                .retain(|t| t.label.eq_ignore_ascii_case(domain));
        }
        crawl
    }
}
