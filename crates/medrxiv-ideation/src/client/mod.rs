//! HTTP clients for the outbound collaborators.
//!
//! - [`PreprintClient`]: paginated medRxiv details fetch
//! - [`ScholarClient`]: Semantic Scholar author and h-index lookups
//! - [`ChatClient`]: one-sentence problem extraction via a chat completions endpoint
//! - [`SeeChatClient`]: create and edit hypotheses on SeeChat
//!
//! Every client is built on a plain `reqwest::Client` with a per-service timeout.
//! Nothing is retried; a failed call is reported once and the caller decides.

mod llm;
mod preprints;
mod publisher;
mod scholar;
pub mod stream;

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub use llm::ChatClient;
pub use preprints::PreprintClient;
pub use publisher::SeeChatClient;
pub use scholar::ScholarClient;

use crate::error::{ClientError, ClientResult};

/// Build a `reqwest::Client` with JSON content type plus `headers`.
fn http_client(
    headers: HeaderMap,
    timeout: Duration,
    connect_timeout: Duration,
) -> anyhow::Result<Client> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    default_headers.extend(headers);

    let client = Client::builder()
        .default_headers(default_headers)
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .gzip(true)
        .build()?;
    Ok(client)
}

/// Secret header value, hidden from `Debug` output.
fn secret_header(value: &str) -> anyhow::Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value)?;
    header.set_sensitive(true);
    Ok(header)
}

/// Map non-success status codes to [`ClientError`].
async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        429 => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);

            Err(ClientError::rate_limited(retry_after))
        }
        404 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::not_found(text))
        }
        400 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::bad_request(text))
        }
        500..=599 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::server(status.as_u16(), text))
        }
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
        }
    }
}

/// Read the body and decode it as JSON.
///
/// Body read failures are transport errors; decode failures are [`ClientError::Parse`].
async fn read_json<T>(response: Response, timeout: Duration) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    let bytes = response.bytes().await.map_err(|e| ClientError::transport(e, timeout))?;
    serde_json::from_slice(&bytes).map_err(ClientError::from)
}
