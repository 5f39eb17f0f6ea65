//! The HTTP seam between the request channel and the network.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;

use crate::{Error, Result};

use super::config::ClientConfig;

/// Sends one composed POST body and returns the decoded JSON payload.
///
/// Implementations own connection handling, TLS, and timeouts. They must
/// map any failure (connection error, non-2xx status, undecodable body) to
/// one of the transport variants of [`Error`].
///
/// The default implementation is [`HttpTransport`]; tests can supply their
/// own to observe outgoing requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` and decode the response body as JSON.
    async fn post(&self, url: &str, body: String) -> Result<Value>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport using the timeout and User-Agent from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { http })
    }

    /// Wrap an existing `reqwest` client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, body: String) -> Result<Value> {
        let response = self
            .http
            .post(url)
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(serde_json::from_str(&text)?)
        } else {
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            Err(Error::from_api_response(status.as_u16(), body))
        }
    }
}
