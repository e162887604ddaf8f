//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, FetchArgs, OutputFormat};
use crate::config::ClientConfig;
use crate::dispatch::{DispatchOptions, PageRequest};
use crate::error::{Error, Result};
use crate::http::{AuthConfig, HttpClient};
use futures::StreamExt;
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch(args) => self.fetch(args).await,
            Commands::Config => self.show_config(),
        }
    }

    /// Load configuration from the `--config` file, or defaults
    fn load_config(&self) -> Result<ClientConfig> {
        match &self.cli.config {
            Some(path) => ClientConfig::load(path),
            None => Ok(ClientConfig::default()),
        }
    }

    /// Configuration with command line overrides applied
    fn effective_config(&self, args: &FetchArgs) -> Result<ClientConfig> {
        let mut config = self.load_config()?;

        if let Some(base_url) = &args.base_url {
            config.base_url = Some(base_url.clone());
        }
        if let Some(token) = &args.token {
            config.auth = AuthConfig::bearer(token);
        }
        if let Some(prefetch) = args.prefetch {
            config.stream.prefetch = prefetch.into();
        }

        Ok(config)
    }

    /// Stream a collection to stdout
    async fn fetch(&self, args: &FetchArgs) -> Result<()> {
        let config = self.effective_config(args)?;
        let client = HttpClient::with_config(config.http_config())?;
        let request = build_request(args)?;
        let options = build_options(args)?;

        info!(
            path = %args.path,
            prefetch = %config.stream.prefetch,
            "fetching collection"
        );

        let started = Instant::now();
        let mut stream = client.stream::<Value>(request, options, &config.stream);
        let mut count = 0usize;

        loop {
            if args.max_items.is_some_and(|max| count >= max) {
                break;
            }
            match stream.next().await {
                Some(item) => {
                    output_item(&item?, args.format);
                    count += 1;
                }
                None => break,
            }
        }

        info!(
            items = count,
            pages = stream.stats().pages_fetched,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetch complete"
        );

        Ok(())
    }

    /// Print the effective configuration
    fn show_config(&self) -> Result<()> {
        let config = self.load_config()?;
        print!("{}", config.to_yaml()?);
        Ok(())
    }
}

/// Split a `key=value` argument
fn parse_key_value(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(Error::config(format!(
            "Expected key=value, got '{arg}'"
        ))),
    }
}

/// Build the first page request
fn build_request(args: &FetchArgs) -> Result<PageRequest> {
    let mut request = PageRequest::new(&args.path);
    for arg in &args.query {
        let (key, value) = parse_key_value(arg)?;
        request = request.query(key, value);
    }
    if let Some(limit) = args.limit {
        request = request.query("limit", limit.to_string());
    }
    Ok(request)
}

/// Build the options sent with every page request
fn build_options(args: &FetchArgs) -> Result<DispatchOptions> {
    let mut options = DispatchOptions::new();
    for arg in &args.header {
        let (key, value) = parse_key_value(arg)?;
        options = options.header(key, value);
    }
    Ok(options)
}

/// Output one item
fn output_item(item: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(item).unwrap_or_default());
        }
        OutputFormat::Pretty => {
            println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
        }
    }
}
