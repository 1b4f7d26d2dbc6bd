use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract -> transform -> load. Returns the cleaned artifact path,
    /// or `None` when the crawl produced no rows (export skipped; the only
    /// run-level condition, and it is non-fatal).
    pub async fn run(&self) -> Result<Option<String>> {
        tracing::info!("Starting crawl");
        let raw_rows = self.pipeline.extract().await?;
        tracing::info!("Scraped {} rows", raw_rows.len());

        if raw_rows.is_empty() {
            tracing::warn!("No data scraped; skipping export");
            return Ok(None);
        }

        tracing::info!("Cleaning dataset");
        let result = self.pipeline.transform(raw_rows).await?;
        tracing::info!("Cleaned {} rows", result.rows.len());

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(Some(output_path))
    }
}
