//! fetchgate command line front-end.
//!
//! Runs the same validate → fetch → format pipeline as the server, once, for
//! a URL given on the command line.

use anyhow::{Result, bail};
use clap::Parser;
use fetchgate_client::{CommandConfig, CommandFetcher, FetchClient, FetchConfig};
use fetchgate_core::{AppConfig, FetchRequest, FetchResult, format};
use tracing_subscriber::EnvFilter;

/// Fetch a URL server-side style and print the payload the server would return.
#[derive(Debug, Parser)]
#[command(name = "fetchgate-cli", version, about)]
struct Cli {
    /// Target URL.
    url: String,

    /// Use the external fetch command instead of the HTTP client.
    #[arg(long)]
    command: bool,

    /// Extra argument passed to the fetch command (with --command).
    #[arg(long, requires = "command", allow_hyphen_values = true)]
    option: Option<String>,

    /// Pretty-print the JSON payload.
    #[arg(long, conflicts_with = "command")]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    if cli.command {
        let request = FetchRequest::from_parts(Some(cli.url), cli.option)?;
        let fetcher = CommandFetcher::new(CommandConfig::from(&config));
        let output = fetcher.run(&request.target_url, request.option.as_deref()).await?;
        print!("{}", output.to_html());
        return Ok(());
    }

    let client = FetchClient::new(FetchConfig::from(&config))?;
    let result = fetch_library(&client, cli.url).await;
    let payload = format(&result);

    if cli.pretty {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", payload.to_json());
    }

    if let Some(error) = result.error() {
        bail!("fetch failed: {error}");
    }

    Ok(())
}

/// Library-style pipeline; every outcome, a blank URL included, becomes a result.
async fn fetch_library(client: &FetchClient, url: String) -> FetchResult {
    match FetchRequest::from_parts(Some(url), None) {
        Ok(request) => client.fetch_guarded(&request.target_url).await,
        Err(e) => FetchResult::from_error(&e),
    }
}
