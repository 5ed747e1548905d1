//! Base HTTP client for the ledger gateway.
//!
//! Provides `get_text()` / `get_json()` for read endpoints and
//! `post_json()` for submissions. Every call is bounded by the configured
//! timeout and attempted exactly once.

use crate::error::RpcError;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Longest slice of an error body kept in `RpcError::HttpStatus`.
const ERROR_BODY_LIMIT: usize = 500;

/// Configuration for an RPC client.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Base URL (e.g., `https://arweave.net:443`).
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://arweave.net:443".to_string(),
            timeout: Duration::from_secs(hooverd_types::constants::DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Status and body returned by a submission endpoint.
///
/// Submissions report non-2xx statuses here rather than as errors; the
/// caller decides what a given status means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOutcome {
    pub status: u16,
    pub body: String,
}

impl PostOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async HTTP client for gateway endpoints.
pub struct RpcClient {
    client: reqwest::Client,
    config: RpcConfig,
}

impl RpcClient {
    /// Create a new client with the given URL and default timeout.
    pub fn new(url: &str) -> Result<Self, RpcError> {
        Self::with_config(RpcConfig {
            url: url.to_string(),
            ..Default::default()
        })
    }

    /// Create a new client with full configuration.
    pub fn with_config(mut config: RpcConfig) -> Result<Self, RpcError> {
        config.url = config.url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| RpcError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the configured base URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.url, endpoint)
    }

    fn transport_error(endpoint: &str, url: &str, source: reqwest::Error) -> RpcError {
        if source.is_timeout() {
            RpcError::Timeout {
                url: url.to_string(),
            }
        } else {
            RpcError::Http {
                endpoint: endpoint.to_string(),
                url: url.to_string(),
                source,
            }
        }
    }

    /// GET a plain-text endpoint, failing on any non-2xx status.
    pub async fn get_text(&self, endpoint: &str) -> Result<String, RpcError> {
        let url = self.endpoint_url(endpoint);
        log::debug!("GET {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::transport_error(endpoint, &url, e))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| Self::transport_error(endpoint, &url, e))?;

        if !(200..300).contains(&status) {
            return Err(RpcError::HttpStatus {
                endpoint: endpoint.to_string(),
                url,
                status,
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        Ok(body)
    }

    /// GET a JSON endpoint and deserialize the response.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, RpcError> {
        let body = self.get_text(endpoint).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST a JSON body and report whatever status the gateway answered with.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<PostOutcome, RpcError> {
        let url = self.endpoint_url(endpoint);
        log::debug!("POST {}", url);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let resp = self
            .client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| Self::transport_error(endpoint, &url, e))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| Self::transport_error(endpoint, &url, e))?;

        Ok(PostOutcome { status, body })
    }
}
