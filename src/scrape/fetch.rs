use crate::config::CrawlConfig;
use crate::utils::error::{EtlError, Result};
use reqwest::Client;

/// Thin wrapper over one shared `reqwest::Client` with the fixed browser
/// identity header and request timeout. One attempt per page, no retries;
/// callers log failures and degrade.
pub struct PageFetcher {
    client: Client,
    user_agent: String,
}

impl PageFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Fetches a page body. Returns the raw HTML text rather than a parsed
    /// document so extraction can parse it synchronously (`scraper::Html` is
    /// not `Send` and must not be held across await points in worker tasks).
    pub async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|source| EtlError::FetchError {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| EtlError::FetchError {
            url: url.to_string(),
            source,
        })?;

        Ok(body)
    }
}
