//! HTTP page dispatcher
//!
//! Provides an HTTP client that handles:
//! - Base URL joining for relative page paths
//! - Default and per-request headers, query parameters and timeouts
//! - Authentication
//! - Status classification into errors
//!
//! Every request is attempted exactly once.

use super::auth::AuthConfig;
use crate::dispatch::{DispatchOptions, Dispatcher, PageRequest};
use crate::error::{Error, Result};
use crate::stream::{ResourceStream, StreamConfig};
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for relative page paths
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
    /// Credentials for all requests
    pub auth: AuthConfig,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            default_headers: StringMap::new(),
            user_agent: format!("resource-stream/{}", env!("CARGO_PKG_VERSION")),
            auth: AuthConfig::None,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set credentials
    pub fn auth(mut self, auth: AuthConfig) -> Self {
        self.config.auth = auth;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client that fetches collection pages as JSON
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Fetch one page and parse its JSON body
    pub async fn get_json(
        &self,
        request: &PageRequest,
        options: &DispatchOptions,
    ) -> Result<JsonValue> {
        let url = self.build_url(&request.target)?;
        let timeout = options.timeout.unwrap_or(self.config.timeout);

        let mut req = self.client.get(url.clone());

        // Add default headers
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Add request-specific headers
        for (key, value) in &options.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Add query parameters
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if !options.query.is_empty() {
            req = req.query(&options.query);
        }

        req = self.config.auth.apply(req).timeout(timeout);

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!(%url, "request timed out");
                return Err(Error::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            Err(e) => {
                warn!(%url, error = %e, "request failed");
                return Err(Error::Http(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "request returned an error status");
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!(%url, "request succeeded");
        let body: JsonValue = response.json().await?;
        Ok(body)
    }

    /// Stream every item of the collection starting at `request`
    pub fn stream<T: DeserializeOwned>(
        &self,
        request: PageRequest,
        options: DispatchOptions,
        config: &StreamConfig,
    ) -> ResourceStream<T> {
        ResourceStream::fetch_with_config(Arc::new(self.clone()), request, options, config)
    }

    /// Build a full URL from a page target
    pub fn build_url(&self, target: &str) -> Result<Url> {
        if target.starts_with("http://") || target.starts_with("https://") {
            return Ok(Url::parse(target)?);
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = target.trim_start_matches('/');
                Ok(Url::parse(&format!("{base}/{path}"))?)
            }
            None => Err(Error::config(format!(
                "relative page target `{target}` needs a base_url"
            ))),
        }
    }
}

#[async_trait]
impl Dispatcher for HttpClient {
    async fn get(&self, request: &PageRequest, options: &DispatchOptions) -> Result<JsonValue> {
        self.get_json(request, options).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("has_auth", &!self.config.auth.is_none())
            .finish_non_exhaustive()
    }
}
