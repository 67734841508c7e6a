//! HTTP client for the date/time service.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use std::time::Duration;

use super::content::ContentKind;
use super::error::FetchError;
use crate::config::Config;

/// Per-request timeout applied by the transport.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Path appended to the base URL.
pub const DATETIME_PATH: &str = "/datetime";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchDateTime: Send + Sync {
    /// Performs one GET request and returns the decoded date/time.
    async fn fetch_datetime(&self) -> Result<String, FetchError>;
}

/// Client for `GET {base_url}/datetime`.
#[derive(Clone)]
pub struct DateTimeClient {
    client: Client,
    config: Config,
}

impl DateTimeClient {
    /// Creates a client with a transport limited to [`REQUEST_TIMEOUT`].
    #[tracing::instrument(skip(config))]
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a client around an existing reqwest Client.
    pub fn with_client(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full URL of the date/time endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.config.base_url, DATETIME_PATH)
    }
}

#[async_trait]
impl FetchDateTime for DateTimeClient {
    #[tracing::instrument(skip(self))]
    async fn fetch_datetime(&self) -> Result<String, FetchError> {
        let url = self.endpoint();
        debug!("GET {}...", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            // Drain the body so the connection goes back clean; its content is not inspected.
            let _ = response.bytes().await;
            return Err(FetchError::UnexpectedStatus {
                code: status.as_u16(),
            });
        }

        let content_type = content_type(response.headers());
        debug!("Response {} with content type {:?}", status, content_type);

        let body = response.bytes().await?;

        ContentKind::classify(&content_type).decode(&body)
    }
}

/// Declared content type, empty when the header is missing.
fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default()
}
