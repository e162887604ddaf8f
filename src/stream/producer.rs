//! Page producer
//!
//! Feeds a [`BufferedReadable`](crate::buffer::BufferedReadable) from a chain
//! of page fetches, keeping at most one fetch outstanding.

use super::types::{StreamConfig, StreamState, StreamStats};
use crate::buffer::{Producer, Sink};
use crate::dispatch::{DispatchOptions, Dispatcher, PageFuture};
use crate::error::Result;
use crate::pagination::{self, PageResponse, PageShape};
use crate::types::{JsonValue, Prefetch};
use futures::{ready, FutureExt};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::{debug, warn};

enum State {
    Idle(PageFuture),
    Fetching(PageFuture),
    Ended,
    Failed,
}

/// Producer half of a [`ResourceStream`](super::ResourceStream)
pub struct PageProducer<T> {
    state: State,
    dispatcher: Arc<dyn Dispatcher>,
    options: DispatchOptions,
    shape: PageShape,
    prefetch: Prefetch,
    stats: StreamStats,
    _item: PhantomData<fn() -> T>,
}

impl<T> PageProducer<T> {
    /// Create a producer. Without a first page it is ended from the start.
    pub fn new(
        dispatcher: Arc<dyn Dispatcher>,
        first_page: Option<PageFuture>,
        options: DispatchOptions,
        config: &StreamConfig,
    ) -> Self {
        Self {
            state: first_page.map_or(State::Ended, State::Idle),
            dispatcher,
            options,
            shape: config.shape.clone(),
            prefetch: config.prefetch,
            stats: StreamStats::default(),
            _item: PhantomData,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> StreamState {
        match self.state {
            State::Idle(_) => StreamState::Idle,
            State::Fetching(_) => StreamState::Fetching,
            State::Ended => StreamState::Ended,
            State::Failed => StreamState::Failed,
        }
    }

    /// Page and item counters
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    /// Start a fetch. Eager fetches run as tokio tasks when a runtime is
    /// available, so they progress while the consumer is not polling.
    fn arm(&self, page: PageFuture) -> PageFuture {
        if !self.prefetch.is_eager() {
            return page;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let task = handle.spawn(page);
                async move { task.await? }.boxed()
            }
            Err(_) => page,
        }
    }
}

impl<T: DeserializeOwned> PageProducer<T> {
    /// Continuation of a settled fetch
    fn settle(&mut self, outcome: Result<JsonValue>, sink: &mut Sink<T>) {
        let page = match outcome.and_then(|body| PageResponse::<T>::from_value(body, &self.shape))
        {
            Ok(page) => page,
            Err(error) => {
                warn!(%error, pages = self.stats.pages_fetched, "page fetch failed, closing stream");
                self.state = State::Failed;
                sink.fail(error);
                return;
            }
        };

        self.stats.record_page(page.len());
        debug!(
            page = self.stats.pages_fetched,
            items = page.len(),
            "page fetched"
        );

        let next = pagination::next_page(&page, &self.dispatcher, &self.options);
        sink.extend(page.data);

        self.state = match next {
            Some(next) if self.prefetch.is_eager() => State::Fetching(self.arm(next)),
            Some(next) => State::Idle(next),
            None => {
                debug!(
                    pages = self.stats.pages_fetched,
                    items = self.stats.items_fetched,
                    "no more pages"
                );
                sink.end();
                State::Ended
            }
        };
    }
}

impl<T: DeserializeOwned> Producer for PageProducer<T> {
    type Item = T;

    fn produce(&mut self, sink: &mut Sink<T>) {
        match std::mem::replace(&mut self.state, State::Ended) {
            State::Idle(page) => {
                debug!(prefetch = %self.prefetch, "fetching page");
                self.state = State::Fetching(self.arm(page));
            }
            State::Ended => sink.end(),
            // a fetch is already outstanding, or the stream has failed
            other => self.state = other,
        }
    }

    fn poll_drive(&mut self, cx: &mut Context<'_>, sink: &mut Sink<T>) -> Poll<()> {
        loop {
            let State::Fetching(page) = &mut self.state else {
                return Poll::Ready(());
            };
            let outcome = ready!(page.poll_unpin(cx));
            self.settle(outcome, sink);
        }
    }
}

impl<T> std::fmt::Debug for PageProducer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageProducer")
            .field("state", &self.state())
            .field("options", &self.options)
            .field("shape", &self.shape)
            .field("prefetch", &self.prefetch)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
