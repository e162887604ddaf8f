//! CLI module
//!
//! Command-line interface for streaming collections.
//!
//! # Commands
//!
//! - `fetch` - Stream every item of a collection to stdout
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, FetchArgs, OutputFormat, PrefetchArg};
pub use runner::Runner;
