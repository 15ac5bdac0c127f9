// crates/network/src/client.rs
//! HTTP client wrapper with retry

use crate::error::{NetworkError, NetworkResult};
use crate::retry::{with_retry, RetryPolicy};
use log::debug;
use reqwest::{Client as ReqwestClient, Response};
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Maximum HTTP redirects to follow per request
    pub max_redirects: usize,
    /// Retry policy
    pub retry_policy: Option<RetryPolicy>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("podfeed/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
            retry_policy: Some(RetryPolicy::new(3).with_initial_delay(Duration::from_millis(100))),
        }
    }
}

/// HTTP client that retries transport failures and server errors
#[derive(Debug, Clone)]
pub struct Client {
    inner: ReqwestClient,
    config: ClientConfig,
}

impl Client {
    /// Creates a new client with default configuration
    pub fn new() -> NetworkResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> NetworkResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            inner: client,
            config,
        })
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Performs a GET request, returning only successful responses
    pub async fn get(&self, url: &str) -> NetworkResult<Response> {
        match &self.config.retry_policy {
            Some(policy) => with_retry(policy, || self.send(url)).await,
            None => self.send(url).await,
        }
    }

    /// Fetches a URL and returns its body as text
    pub async fn get_text(&self, url: &str) -> NetworkResult<String> {
        let response = self.get(url).await?;
        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }

    async fn send(&self, url: &str) -> NetworkResult<Response> {
        let response = self.inner.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            Err(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            })
        }
    }
}
