//! medRxiv details API client.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::HeaderMap;

use super::{check_status, http_client, read_json};
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{DateRange, DetailsPage, FetchCursor, PaperRecord};

/// Paginated fetcher for `{base}/{start}/{end}/{cursor}`.
#[derive(Debug, Clone)]
pub struct PreprintClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl PreprintClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = http_client(HeaderMap::new(), config.fetch_timeout, config.connect_timeout)?;
        Ok(Self {
            client,
            base_url: config.preprint_api_url.clone(),
            timeout: config.fetch_timeout,
        })
    }

    /// URL of the page at `cursor`.
    #[must_use]
    pub fn page_url(&self, range: DateRange, cursor: FetchCursor) -> String {
        format!("{}/{}/{}/{}", self.base_url, range.start, range.end, cursor.offset)
    }

    /// Fetch one page.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or a malformed body.
    pub async fn fetch_page(&self, range: DateRange, cursor: FetchCursor) -> ClientResult<DetailsPage> {
        let url = self.page_url(range, cursor);
        tracing::debug!(%url, offset = cursor.offset, "Fetching preprint page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::transport(e, self.timeout))?;
        let response = check_status(response).await?;
        read_json(response, self.timeout).await
    }

    /// Fetch every record posted in `range`, in receipt order.
    ///
    /// A failing page ends pagination; records from earlier pages are still returned.
    pub async fn fetch(&self, range: DateRange) -> Vec<PaperRecord> {
        let mut papers = Vec::new();
        let mut cursor = FetchCursor::start();

        loop {
            let page = match self.fetch_page(range, cursor).await {
                Ok(page) => page,
                Err(e) if e.is_transport() => {
                    tracing::warn!(
                        %range,
                        offset = cursor.offset,
                        fetched = papers.len(),
                        error = %e,
                        "Preprint fetch stopped early, keeping partial results"
                    );
                    break;
                }
                Err(e) => {
                    tracing::error!(
                        %range,
                        offset = cursor.offset,
                        fetched = papers.len(),
                        error = %e,
                        "Malformed preprint page, keeping partial results"
                    );
                    break;
                }
            };

            let next = cursor.advance(&page);
            tracing::debug!(
                offset = cursor.offset,
                received = page.collection.len(),
                total = ?page.pagination().map(|p| p.total),
                "Received preprint page"
            );
            papers.extend(page.collection);

            match next {
                Some(next) => cursor = next,
                None => break,
            }
        }

        tracing::info!(%range, count = papers.len(), "Fetched preprints");
        papers
    }
}
