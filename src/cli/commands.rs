//! CLI commands and argument parsing

use crate::types::Prefetch;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Stream every item of a paginated REST collection
#[derive(Parser, Debug)]
#[command(name = "resource-stream")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every item of a collection and print it
    Fetch(FetchArgs),

    /// Print the effective configuration
    Config,
}

/// Arguments of the `fetch` command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Collection path or absolute URL (e.g., /tasks)
    pub path: String,

    /// Base URL for relative paths (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Query parameter for the first page (key=value, repeatable)
    #[arg(short, long)]
    pub query: Vec<String>,

    /// Header sent with every page request (key=value, repeatable)
    #[arg(short = 'H', long)]
    pub header: Vec<String>,

    /// Bearer token (overrides the config file)
    #[arg(long, env = "RESOURCE_STREAM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Page size, sent as the `limit` query parameter
    #[arg(long)]
    pub limit: Option<u32>,

    /// Stop after this many items
    #[arg(long)]
    pub max_items: Option<usize>,

    /// When to request the following page
    #[arg(long)]
    pub prefetch: Option<PrefetchArg>,

    /// Output format
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,
}

/// Prefetch policy as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PrefetchArg {
    /// Fetch the following page as soon as a page arrives
    Eager,
    /// Fetch the following page once the buffer is drained
    OnDemand,
}

impl From<PrefetchArg> for Prefetch {
    fn from(arg: PrefetchArg) -> Self {
        match arg {
            PrefetchArg::Eager => Prefetch::Eager,
            PrefetchArg::OnDemand => Prefetch::OnDemand,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Human-readable output
    Pretty,
}
