//! Chat completions client for problem extraction.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

use super::{check_status, http_client, read_json, secret_header};
use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::pipeline::ProblemExtractor;

/// Instruction sent as the system message of every extraction.
pub const SYSTEM_PROMPT: &str = "Act like a scientific research assistant. You are an expert in \
analyzing research abstracts and identifying core research problems.
Your task is to extract only the core problem or main issue the paper addresses.
Do not mention any methods, solutions, or results.
Use plain, simple language that any reader can understand.
Limit your output to a single sentence of no more than 20 words.
Do not include any explanation, intro, or extra text. Output only the problem statement.";

/// Per-abstract user message.
#[must_use]
pub fn user_prompt(abstract_text: &str) -> String {
    format!(
        "Abstract: \"\"\"{}\"\"\"\nExtract the core research problem in ≤20 words.\n\
         Take a deep breath and work on this problem step-by-step.",
        abstract_text.trim()
    )
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an Azure AI inference style `chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
    model: Option<String>,
    timeout: Duration,
}

impl ChatClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("api-key", secret_header(&config.llm_api_key)?);
        headers.insert(
            reqwest::header::AUTHORIZATION,
            secret_header(&format!("Bearer {}", config.llm_api_key))?,
        );

        let client = http_client(headers, config.llm_timeout, config.connect_timeout)?;
        Ok(Self {
            client,
            endpoint: config.llm_endpoint.clone(),
            model: config.llm_model.clone(),
            timeout: config.llm_timeout,
        })
    }

    /// Send one system and one user message and return the first choice, trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::EmptyResponse`] when there is no choice or its text is blank.
    pub async fn complete(&self, system: &str, user: &str) -> ClientResult<String> {
        let url = format!("{}/chat/completions", self.endpoint);
        let request = ChatRequest {
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            max_tokens: api::LLM_MAX_TOKENS,
            stream: false,
            model: self.model.as_deref(),
        };

        let response = self
            .client
            .post(&url)
            .query(&[("api-version", api::LLM_API_VERSION)])
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::transport(e, self.timeout))?;

        let response = check_status(response).await?;
        let body: ChatResponse = read_json(response, self.timeout).await?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(ClientError::EmptyResponse { service: "chat completions" })
    }
}

#[async_trait]
impl ProblemExtractor for ChatClient {
    async fn extract_problem(&self, abstract_text: &str) -> ClientResult<String> {
        self.complete(SYSTEM_PROMPT, &user_prompt(abstract_text)).await
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
