//! HTTP client module
//!
//! Provides the reqwest-backed [`Dispatcher`](crate::dispatch::Dispatcher).
//!
//! # Features
//!
//! - **Base URL joining**: Page tokens may carry absolute URIs or relative paths
//! - **Authentication**: Bearer, Basic and API key credentials
//! - **Per-stream options**: Headers, query parameters and timeouts from
//!   [`DispatchOptions`](crate::dispatch::DispatchOptions)

mod auth;
mod client;

pub use auth::{AuthConfig, Location};
pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
