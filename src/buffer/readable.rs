//! Buffered pull stream
//!
//! [`BufferedReadable`] owns an item queue and releases items to the
//! consumer one poll at a time. When the queue runs dry it asks its
//! [`Producer`] for more.

use crate::error::{Error, Result};
use futures::stream::{FusedStream, Stream};
use pin_project_lite::pin_project;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::warn;

/// Source of items for a [`BufferedReadable`]
pub trait Producer {
    /// Items handed to the consumer
    type Item;

    /// Called whenever the queue is empty and the consumer is pulling.
    ///
    /// Each call should push into the sink, close it, or start asynchronous
    /// work that [`Producer::poll_drive`] reports as pending. A call that does
    /// none of these makes the stream wake itself and return `Pending`, so it
    /// is asked again on the next poll. A producer that never makes progress
    /// therefore busy-polls the executor.
    fn produce(&mut self, sink: &mut Sink<Self::Item>);

    /// Drive outstanding asynchronous work.
    ///
    /// Called on every consumer poll, before buffered items are released.
    /// Returns `Poll::Pending` while work is outstanding.
    fn poll_drive(&mut self, _cx: &mut Context<'_>, _sink: &mut Sink<Self::Item>) -> Poll<()> {
        Poll::Ready(())
    }
}

#[derive(Debug)]
enum Signal {
    Open,
    Ended,
    Failed(Error),
    Finished,
}

/// Write side of a [`BufferedReadable`]
#[derive(Debug)]
pub struct Sink<T> {
    queue: VecDeque<T>,
    signal: Signal,
}

impl<T> Default for Sink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Sink<T> {
    /// Create an open, empty sink
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            signal: Signal::Open,
        }
    }

    /// Enqueue one item
    pub fn push(&mut self, item: T) {
        if self.is_closed() {
            warn!("item pushed after stream was closed, dropping it");
            return;
        }
        self.queue.push_back(item);
    }

    /// Enqueue items in order
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        if self.is_closed() {
            warn!("items pushed after stream was closed, dropping them");
            return;
        }
        self.queue.extend(items);
    }

    /// Signal that no more items will follow
    pub fn end(&mut self) {
        if matches!(self.signal, Signal::Open) {
            self.signal = Signal::Ended;
        }
    }

    /// Signal a failure. The first signal wins.
    pub fn fail(&mut self, error: Error) {
        if matches!(self.signal, Signal::Open) {
            self.signal = Signal::Failed(error);
        } else {
            warn!(%error, "failure signaled after stream was closed, dropping it");
        }
    }

    /// Check if end or failure has been signaled
    pub fn is_closed(&self) -> bool {
        !matches!(self.signal, Signal::Open)
    }

    /// Number of buffered items
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if no items are buffered
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Next thing the consumer should see, if anything is ready.
    ///
    /// Buffered items come before the terminal signal; a failure is
    /// reported once, then the sink reads as finished.
    fn take_ready(&mut self) -> Option<Option<Result<T>>> {
        if let Some(item) = self.queue.pop_front() {
            return Some(Some(Ok(item)));
        }
        match std::mem::replace(&mut self.signal, Signal::Finished) {
            Signal::Open => {
                self.signal = Signal::Open;
                None
            }
            Signal::Failed(error) => Some(Some(Err(error))),
            Signal::Ended | Signal::Finished => Some(None),
        }
    }

    fn is_finished(&self) -> bool {
        self.queue.is_empty() && matches!(self.signal, Signal::Ended | Signal::Finished)
    }
}

pin_project! {
    /// Object-mode pull stream fed by a [`Producer`]
    pub struct BufferedReadable<P: Producer> {
        producer: P,
        sink: Sink<P::Item>,
    }
}

impl<P: Producer> BufferedReadable<P> {
    /// Wrap a producer
    pub fn new(producer: P) -> Self {
        Self {
            producer,
            sink: Sink::new(),
        }
    }

    /// Get the producer
    pub fn producer(&self) -> &P {
        &self.producer
    }

    /// Number of items waiting to be read
    pub fn buffered_len(&self) -> usize {
        self.sink.len()
    }
}

impl<P: Producer> Stream for BufferedReadable<P> {
    type Item = Result<P::Item>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let mut produced = false;

        loop {
            let busy = this.producer.poll_drive(cx, this.sink).is_pending();

            if let Some(ready) = this.sink.take_ready() {
                return Poll::Ready(ready);
            }
            if busy {
                return Poll::Pending;
            }
            if produced {
                // nothing pushed, closed or started: ask again on the next poll
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }

            this.producer.produce(this.sink);
            produced = true;
        }
    }
}

impl<P: Producer> FusedStream for BufferedReadable<P> {
    fn is_terminated(&self) -> bool {
        self.sink.is_finished()
    }
}

impl<P: Producer + std::fmt::Debug> std::fmt::Debug for BufferedReadable<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferedReadable")
            .field("producer", &self.producer)
            .field("buffered", &self.sink.len())
            .field("closed", &self.sink.is_closed())
            .finish()
    }
}
