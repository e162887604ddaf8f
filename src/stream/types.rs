//! Resource stream types
//!
//! Configuration, lifecycle state and statistics for resource streams.

use crate::pagination::PageShape;
use crate::types::Prefetch;
use serde::{Deserialize, Serialize};

/// Configuration for a resource stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// When the following page is requested
    pub prefetch: Prefetch,
    /// Field names of the page response
    pub shape: PageShape,
}

impl StreamConfig {
    /// Create a new stream config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set prefetch policy
    #[must_use]
    pub fn with_prefetch(mut self, prefetch: Prefetch) -> Self {
        self.prefetch = prefetch;
        self
    }

    /// Set page response shape
    #[must_use]
    pub fn with_shape(mut self, shape: PageShape) -> Self {
        self.shape = shape;
        self
    }
}

/// Lifecycle of a resource stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// A page is waiting to be fetched
    Idle,
    /// Exactly one page fetch is outstanding
    Fetching,
    /// All pages were fetched
    Ended,
    /// A fetch failed or returned a malformed page
    Failed,
}

impl StreamState {
    /// Check if the stream can no longer change state
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Failed)
    }
}

impl std::fmt::Display for StreamState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Fetching => write!(f, "fetching"),
            Self::Ended => write!(f, "ended"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Counters for a resource stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Pages fetched and validated
    pub pages_fetched: u64,
    /// Items enqueued from those pages
    pub items_fetched: u64,
}

impl StreamStats {
    /// Create empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one validated page
    pub fn record_page(&mut self, items: usize) {
        self.pages_fetched += 1;
        self.items_fetched += items as u64;
    }
}
