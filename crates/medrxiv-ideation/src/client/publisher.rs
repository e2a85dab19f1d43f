//! SeeChat hypothesis service client.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};

use super::stream::JsonObjectStream;
use super::{check_status, http_client, secret_header};
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{CreateHypothesis, EditHypothesis, StreamEvent};
use crate::pipeline::HypothesisPublisher;

/// Client for `idea/create_hypothesis` and `idea/edit_hypothesis`.
#[derive(Clone)]
pub struct SeeChatClient {
    client: Client,
    api_url: String,
    idea_url: String,
    timeout: Duration,
}

impl SeeChatClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", secret_header(&config.publish_api_key)?);

        let client = http_client(headers, config.publish_timeout, config.connect_timeout)?;
        Ok(Self {
            client,
            api_url: config.publish_api_url.clone(),
            idea_url: config.idea_url.clone(),
            timeout: config.publish_timeout,
        })
    }

    /// Create a hypothesis and return its ID.
    ///
    /// The response is a stream of JSON objects; the ID comes from the first
    /// `metadata` event. The stream is always read to the end.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingField`] if no metadata event carried an ID.
    pub async fn create(&self, request: &CreateHypothesis) -> ClientResult<String> {
        let url = format!("{}/idea/create_hypothesis", self.api_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::transport(e, self.timeout))?;
        let response = check_status(response).await?;

        let mut parser = JsonObjectStream::new();
        let mut hypothesis_id = None;
        let mut events = 0usize;
        let mut body = response.bytes_stream();

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| ClientError::transport(e, self.timeout))?;
            for value in parser.push(&chunk) {
                events += 1;
                if hypothesis_id.is_some() {
                    continue;
                }
                hypothesis_id = serde_json::from_value::<StreamEvent>(value)
                    .ok()
                    .and_then(|event| event.hypothesis_id());
            }
        }

        tracing::debug!(events, found = hypothesis_id.is_some(), "Create stream finished");
        hypothesis_id.ok_or(ClientError::MissingField { field: "hypothesis_id" })
    }

    /// Attach the title and summary to a hypothesis. Succeeds only on HTTP 200.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or any status other than 200.
    pub async fn edit(&self, request: &EditHypothesis) -> ClientResult<()> {
        let url = format!("{}/idea/edit_hypothesis", self.api_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::transport(e, self.timeout))?;

        if response.status() == StatusCode::OK {
            return Ok(());
        }
        match check_status(response).await {
            // 2xx other than 200
            Ok(response) => Err(ClientError::UnexpectedStatus {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl HypothesisPublisher for SeeChatClient {
    async fn create_hypothesis(&self, request: &CreateHypothesis) -> ClientResult<String> {
        self.create(request).await
    }

    async fn edit_hypothesis(&self, request: &EditHypothesis) -> ClientResult<()> {
        self.edit(request).await
    }

    fn idea_url(&self, hypothesis_id: &str) -> String {
        format!("{}/{}", self.idea_url, hypothesis_id)
    }
}

impl std::fmt::Debug for SeeChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeeChatClient").field("api_url", &self.api_url).finish_non_exhaustive()
    }
}
