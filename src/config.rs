//! Client configuration
//!
//! A [`ClientConfig`] describes how to reach a paginated API and how streams
//! over it behave. It can be loaded from YAML or JSON files:
//!
//! ```yaml
//! base_url: https://app.asana.com/api/1.0
//! timeout_secs: 30
//! headers:
//!   Asana-Enable: new_user_task_lists
//! auth:
//!   type: bearer
//!   token: 0/abc
//! stream:
//!   prefetch: on_demand
//!   shape:
//!     items_field: data
//!     next_page_field: next_page
//! ```

use crate::error::{Error, Result};
use crate::http::{AuthConfig, HttpClientConfig};
use crate::stream::StreamConfig;
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Configuration for an HTTP-backed resource stream client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL for relative page paths
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Headers sent with every request
    pub headers: StringMap,

    /// User agent override
    pub user_agent: Option<String>,

    /// Request credentials
    pub auth: AuthConfig,

    /// Stream behavior
    pub stream: StreamConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
            headers: StringMap::new(),
            user_agent: None,
            auth: AuthConfig::None,
            stream: StreamConfig::default(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Parse a config from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a config from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file; `.json` files are parsed as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Render the config as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the HTTP client configuration
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(self.timeout())
            .auth(self.auth.clone());

        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }
}
