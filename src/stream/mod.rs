//! Resource stream module
//!
//! Exposes a paginated collection as one lazy stream of items.
//!
//! # Overview
//!
//! A [`ResourceStream`] is a [`BufferedReadable`] fed by a [`PageProducer`].
//! Pulling from an empty buffer starts the pending page fetch; each settled
//! page is validated, its items are enqueued in order, and the next page is
//! resolved from its continuation token. The stream ends after the last page
//! or fails on the first bad page, yielding exactly one error.
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use resource_stream::http::HttpClient;
//! use resource_stream::{DispatchOptions, PageRequest, StreamConfig};
//!
//! let client = HttpClient::with_config(config)?;
//! let mut tasks = client.stream::<serde_json::Value>(
//!     PageRequest::new("/tasks").query("project", "1337").query("limit", "50"),
//!     DispatchOptions::new(),
//!     &StreamConfig::default(),
//! );
//! while let Some(task) = tasks.next().await {
//!     println!("{}", task?["name"]);
//! }
//! ```

mod producer;
mod types;

pub use producer::PageProducer;
pub use types::{StreamConfig, StreamState, StreamStats};

use crate::buffer::BufferedReadable;
use crate::dispatch::{dispatch, DispatchOptions, Dispatcher, PageFuture, PageRequest};
use crate::error::Result;
use crate::types::JsonValue;
use futures::stream::{FusedStream, Stream};
use pin_project_lite::pin_project;
use serde::de::DeserializeOwned;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

pin_project! {
    /// A lazy stream over every item of a paginated collection
    pub struct ResourceStream<T: DeserializeOwned = JsonValue> {
        #[pin]
        inner: BufferedReadable<PageProducer<T>>,
    }
}

impl<T: DeserializeOwned> ResourceStream<T> {
    /// Create a stream whose first page is already on its way
    pub fn new(
        dispatcher: Arc<dyn Dispatcher>,
        first_page: PageFuture,
        options: DispatchOptions,
    ) -> Self {
        Self::with_config(
            dispatcher,
            Some(first_page),
            options,
            &StreamConfig::default(),
        )
    }

    /// Create a stream with explicit configuration.
    ///
    /// A stream without a first page ends on the first pull.
    pub fn with_config(
        dispatcher: Arc<dyn Dispatcher>,
        first_page: Option<PageFuture>,
        options: DispatchOptions,
        config: &StreamConfig,
    ) -> Self {
        Self {
            inner: BufferedReadable::new(PageProducer::new(
                dispatcher, first_page, options, config,
            )),
        }
    }

    /// Create a stream starting at `request`
    pub fn fetch(
        dispatcher: Arc<dyn Dispatcher>,
        request: PageRequest,
        options: DispatchOptions,
    ) -> Self {
        Self::fetch_with_config(dispatcher, request, options, &StreamConfig::default())
    }

    /// Create a stream starting at `request` with explicit configuration
    pub fn fetch_with_config(
        dispatcher: Arc<dyn Dispatcher>,
        request: PageRequest,
        options: DispatchOptions,
        config: &StreamConfig,
    ) -> Self {
        let first_page = dispatch(Arc::clone(&dispatcher), request, options.clone());
        Self::with_config(dispatcher, Some(first_page), options, config)
    }

    /// Current lifecycle state
    pub fn state(&self) -> StreamState {
        self.inner.producer().state()
    }

    /// Page and item counters
    pub fn stats(&self) -> &StreamStats {
        self.inner.producer().stats()
    }

    /// Number of items fetched but not yet read
    pub fn buffered_len(&self) -> usize {
        self.inner.buffered_len()
    }
}

impl<T: DeserializeOwned> Stream for ResourceStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_next(cx)
    }
}

impl<T: DeserializeOwned> FusedStream for ResourceStream<T> {
    fn is_terminated(&self) -> bool {
        self.inner.is_terminated()
    }
}

impl<T: DeserializeOwned> std::fmt::Debug for ResourceStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStream")
            .field("state", &self.state())
            .field("buffered", &self.buffered_len())
            .field("stats", self.stats())
            .finish()
    }
}
