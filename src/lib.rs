//! # resource-stream
//!
//! Lazy, pull-based streams over paginated REST API collections.
//!
//! A paginated endpoint returns its collection one page at a time, each page
//! carrying an array of items and a token pointing at the next page. A
//! [`ResourceStream`] hides that: consumers read items one by one and pages are
//! fetched behind the scenes as the buffer runs dry.
//!
//! ## Features
//!
//! - **Lazy**: No request is sent until the first item is read
//! - **Ordered**: Items arrive in page order, then array order
//! - **One request in flight**: Pages are chained strictly one after another
//! - **Prefetch policy**: Fetch ahead eagerly or only when the buffer is empty
//! - **Typed items**: Decode items into any `serde::Deserialize` type
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use resource_stream::http::{AuthConfig, HttpClient, HttpClientConfig};
//! use resource_stream::{DispatchOptions, PageRequest, StreamConfig};
//!
//! #[tokio::main]
//! async fn main() -> resource_stream::Result<()> {
//!     let client = HttpClient::with_config(
//!         HttpClientConfig::builder()
//!             .base_url("https://app.asana.com/api/1.0")
//!             .auth(AuthConfig::bearer("0/abc"))
//!             .build(),
//!     )?;
//!
//!     let mut tasks = client.stream::<serde_json::Value>(
//!         PageRequest::new("/tasks").query("project", "1337").query("limit", "50"),
//!         DispatchOptions::new(),
//!         &StreamConfig::default(),
//!     );
//!
//!     while let Some(task) = tasks.next().await {
//!         println!("{}", task?["name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 ResourceStream<T>                        │
//! │   Stream<Item = Result<T>>   state()   stats()           │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴────┬──────────────┬──────────┐
//! │   Buffer     │   Producer       │  Pagination  │ Dispatch │
//! ├──────────────┼──────────────────┼──────────────┼──────────┤
//! │ Sink         │ Idle / Fetching  │ PageShape    │ Trait    │
//! │ Readable     │ Ended / Failed   │ NextPage     │ HTTP     │
//! └──────────────┴──────────────────┴──────────────┴──────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Page request dispatching
pub mod dispatch;

/// Page validation and next page resolution
pub mod pagination;

/// Pull-driven buffered stream primitive
pub mod buffer;

/// Resource streams over paginated collections
pub mod stream;

/// HTTP dispatcher
pub mod http;

/// Client configuration files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use dispatch::{DispatchOptions, Dispatcher, PageRequest};
pub use error::{Error, Result};
pub use stream::{ResourceStream, StreamConfig, StreamState, StreamStats};
pub use types::Prefetch;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
