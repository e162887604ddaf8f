//! Dispatch interface
//!
//! A [`Dispatcher`] performs a single page request and hands back the decoded
//! JSON body. Streams never look inside [`DispatchOptions`]; they carry them
//! from one page request to the next unchanged.

use crate::error::Result;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use std::time::Duration;

/// A pending page fetch resolving to the raw response body
pub type PageFuture = BoxFuture<'static, Result<JsonValue>>;

/// A request for one page of a collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Absolute URL, or a path relative to the dispatcher's base URL
    pub target: String,
    /// Query parameters for this page
    pub query: StringMap,
}

impl PageRequest {
    /// Create a request for a path or URL
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            query: StringMap::new(),
        }
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add several query parameters
    #[must_use]
    pub fn with_query(mut self, query: &StringMap) -> Self {
        self.query
            .extend(query.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }
}

/// Options applied to every request a stream dispatches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Extra request headers
    pub headers: StringMap,
    /// Extra query parameters
    pub query: StringMap,
    /// Override timeout for these requests
    pub timeout: Option<Duration>,
}

impl DispatchOptions {
    /// Create empty dispatch options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Performs page requests on behalf of a resource stream
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Fetch one page and return its JSON body
    async fn get(&self, request: &PageRequest, options: &DispatchOptions) -> Result<JsonValue>;
}

/// Turn a request into an owned page future.
///
/// Nothing is sent until the future is first polled.
pub fn dispatch(
    dispatcher: Arc<dyn Dispatcher>,
    request: PageRequest,
    options: DispatchOptions,
) -> PageFuture {
    async move { dispatcher.get(&request, &options).await }.boxed()
}
