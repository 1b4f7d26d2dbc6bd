use crate::clean::{self, CleanResult, NullPolicy};
use crate::config::{CrawlConfig, DomainTarget};
use crate::core::merge::merge_rows;
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::domain::OutputRow;
use crate::scrape::{listing, EnrichmentScheduler, PageFetcher};
use crate::utils::error::Result;
use std::sync::Arc;

pub const RAW_EXPORT_FILE: &str = "colleges.csv";
pub const CLEAN_EXPORT_FILE: &str = "cleaned_colleges.csv";

/// The whole run as an ETL pipeline: extract crawls and merges, transform
/// cleans, load writes the two CSV artifacts.
pub struct CrawlPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    crawl: CrawlConfig,
    fetcher: Arc<PageFetcher>,
}

impl<S: Storage, C: ConfigProvider> CrawlPipeline<S, C> {
    pub fn new(storage: S, config: C, crawl: CrawlConfig) -> Result<Self> {
        let fetcher = Arc::new(PageFetcher::new(&crawl)?);
        Ok(Self {
            storage,
            config,
            crawl,
            fetcher,
        })
    }

    /// Crawls one category listing. Every failure inside degrades to fewer
    /// rows for this category; the crawl of the remaining categories goes on.
    async fn scrape_domain(&self, target: &DomainTarget) -> Vec<OutputRow> {
        tracing::info!("Scraping {} from {}", target.label, target.listing_url);

        let body = match self.fetcher.fetch(&target.listing_url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Listing fetch failed for {}: {}", target.listing_url, e);
                return Vec::new();
            }
        };

        let institutions = match listing::parse_listing(
            &body,
            &target.card_selector,
            &target.label,
            &self.crawl.base_url,
        ) {
            Ok(institutions) => institutions,
            Err(e) => {
                tracing::warn!("Listing parse failed for {}: {}", target.listing_url, e);
                return Vec::new();
            }
        };
        tracing::info!("Found {} {} cards", institutions.len(), target.label);

        let detail_urls: Vec<String> = institutions
            .iter()
            .filter_map(|i| i.detail_url.clone())
            .collect();

        let scheduler = EnrichmentScheduler::new(
            Arc::clone(&self.fetcher),
            self.config.concurrent_requests(),
            &self.crawl,
        );
        let enrichment = scheduler.enrich(detail_urls).await;

        merge_rows(institutions, &enrichment)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CrawlPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<OutputRow>> {
        let mut rows = Vec::new();
        for target in &self.crawl.targets {
            let domain_rows = self.scrape_domain(target).await;
            tracing::info!("{}: {} rows", target.label, domain_rows.len());
            rows.extend(domain_rows);
        }
        Ok(rows)
    }

    async fn transform(&self, rows: Vec<OutputRow>) -> Result<CleanResult> {
        let cleaned = clean::clean_rows(&rows);
        let raw_csv = clean::to_csv(&cleaned, clean::RAW_COLUMNS, NullPolicy::Empty)?;
        let clean_csv = clean::to_csv(&cleaned, clean::CANONICAL_COLUMNS, NullPolicy::Filled)?;
        Ok(CleanResult {
            rows: cleaned,
            raw_csv,
            clean_csv,
        })
    }

    async fn load(&self, result: CleanResult) -> Result<String> {
        self.storage
            .write_file(RAW_EXPORT_FILE, &result.raw_csv)
            .await?;
        self.storage
            .write_file(CLEAN_EXPORT_FILE, &result.clean_csv)
            .await?;

        // Advisory preview of the final table.
        for row in result.rows.iter().take(5) {
            tracing::info!(
                "{} | {} | {} | {}",
                row.title.as_deref().unwrap_or("-"),
                row.domain,
                row.course_name.as_deref().unwrap_or("-"),
                row.course_fee_inr
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            );
        }

        Ok(format!(
            "{}/{}",
            self.config.output_path(),
            CLEAN_EXPORT_FILE
        ))
    }
}
