//! Semantic Scholar Graph API client for author reputation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use super::{check_status, http_client, read_json, secret_header};
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{AuthorInfluence, PaperAuthors};
use crate::ranker::InfluenceSource;

/// Semantic Scholar client.
///
/// Sleeps for the configured courtesy delay after every successful call.
#[derive(Clone)]
pub struct ScholarClient {
    client: Client,
    graph_api_url: String,
    timeout: Duration,
    courtesy_delay: Duration,
}

impl ScholarClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", secret_header(config.require_scholar_key()?)?);

        let client = http_client(headers, config.scholar_timeout, config.connect_timeout)?;
        Ok(Self {
            client,
            graph_api_url: config.graph_api_url.clone(),
            timeout: config.scholar_timeout,
            courtesy_delay: config.courtesy_delay,
        })
    }

    /// Get the authors of the paper with `doi`.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn paper_authors(&self, doi: &str) -> ClientResult<PaperAuthors> {
        let url = format!("{}/paper/DOI:{}", self.graph_api_url, doi);
        self.get(&url, "authors").await
    }

    /// Get an author's h-index.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn author_influence(&self, author_id: &str) -> ClientResult<AuthorInfluence> {
        let url = format!("{}/author/{}", self.graph_api_url, author_id);
        let mut influence: AuthorInfluence = self.get(&url, "hIndex").await?;
        if influence.author_id.is_empty() {
            influence.author_id = author_id.to_string();
        }
        Ok(influence)
    }

    /// Make a GET request with a `fields` selector.
    async fn get<T>(&self, url: &str, fields: &str) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .query(&[("fields", fields)])
            .send()
            .await
            .map_err(|e| ClientError::transport(e, self.timeout))?;

        let response = check_status(response).await?;
        let value = read_json(response, self.timeout).await?;

        // Courtesy pause
        tokio::time::sleep(self.courtesy_delay).await;

        Ok(value)
    }
}

#[async_trait]
impl InfluenceSource for ScholarClient {
    async fn author_ids(&self, doi: &str) -> ClientResult<Vec<String>> {
        Ok(self.paper_authors(doi).await?.author_ids())
    }

    async fn influence(&self, author_id: &str) -> ClientResult<AuthorInfluence> {
        self.author_influence(author_id).await
    }
}

impl std::fmt::Debug for ScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScholarClient").field("graph_api_url", &self.graph_api_url).finish()
    }
}
