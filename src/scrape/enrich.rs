use crate::config::CrawlConfig;
use crate::domain::{Course, EnrichmentResult};
use crate::scrape::{detail, fetch::PageFetcher};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Bounded worker pool that visits every detail page once and bundles what it
/// found. A URL whose fetches all fail still yields an (empty) result; the
/// batch never aborts.
pub struct EnrichmentScheduler {
    fetcher: Arc<PageFetcher>,
    concurrency: usize,
    jitter_ms: (u64, u64),
}

impl EnrichmentScheduler {
    pub fn new(fetcher: Arc<PageFetcher>, concurrency: usize, config: &CrawlConfig) -> Self {
        Self {
            fetcher,
            concurrency,
            jitter_ms: config.jitter_ms,
        }
    }

    /// Runs one enrichment task per URL, at most `concurrency` in flight.
    /// Completions are collected in arrival order; row order is restored
    /// later by the merge step, which walks the original card order.
    pub async fn enrich(&self, mut urls: Vec<String>) -> HashMap<String, EnrichmentResult> {
        // The input is a set: a detail URL listed twice gets one fetch
        // sequence, not two.
        let mut seen = HashSet::new();
        urls.retain(|url| seen.insert(url.clone()));

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for url in urls {
            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&self.fetcher);
            let jitter_ms = self.jitter_ms;

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore open");

                let delay = rand::thread_rng().gen_range(jitter_ms.0..=jitter_ms.1);
                tokio::time::sleep(Duration::from_millis(delay)).await;

                // The three page reads are independent and merge by field,
                // so they run concurrently within the task.
                let (location, established, courses) = tokio::join!(
                    fetch_location(&fetcher, &url),
                    fetch_established(&fetcher, &url),
                    fetch_courses(&fetcher, &url),
                );

                (
                    url,
                    EnrichmentResult {
                        location,
                        established,
                        courses,
                    },
                )
            });
        }

        let mut results = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((url, result)) => {
                    results.insert(url, result);
                }
                Err(e) => tracing::warn!("Enrichment task failed: {}", e),
            }
        }
        results
    }
}

async fn fetch_location(fetcher: &PageFetcher, url: &str) -> Option<String> {
    match fetcher.fetch(url).await {
        Ok(body) => detail::location(&body),
        Err(e) => {
            tracing::warn!("Location fetch failed for {}: {}", url, e);
            None
        }
    }
}

async fn fetch_established(fetcher: &PageFetcher, url: &str) -> Option<String> {
    match fetcher.fetch(url).await {
        Ok(body) => detail::established_year(&body),
        Err(e) => {
            tracing::warn!("Established-year fetch failed for {}: {}", url, e);
            None
        }
    }
}

async fn fetch_courses(fetcher: &PageFetcher, url: &str) -> Vec<Course> {
    let courses_url = detail::courses_url(url);
    match fetcher.fetch(&courses_url).await {
        Ok(body) => detail::courses(&body),
        Err(e) => {
            tracing::warn!("Courses fetch failed for {}: {}", courses_url, e);
            Vec::new()
        }
    }
}
