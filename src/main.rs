use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use yt_views::cli::{Cli, normalize_args};
use yt_views::commands;
use yt_views::config::{ProgramInputs, api_base_url, api_key, load_env};
use yt_views::error::Result;
use yt_views::youtube::{VideoApi, YouTubeClient};

/// Resolve inputs, then build the client with `connect` and write the report to stdout.
///
/// `connect` only runs once the key and channel have been validated.
async fn run<C, F>(cli: Cli, key: Option<String>, connect: F) -> Result<()>
where
    C: VideoApi,
    F: FnOnce(&ProgramInputs) -> Result<C>,
{
    let inputs = ProgramInputs::resolve(cli, key)?;

    let client = connect(&inputs)?;
    let stdout = std::io::stdout().lock();
    commands::report::run(&client, &inputs, stdout).await
}

#[tokio::main]
async fn main() {
    // stdout carries the CSV, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    load_env();

    let cli = Cli::parse_from(normalize_args(std::env::args()));
    let key = api_key(&cli.key_env);

    let result = run(cli, key, |inputs| {
        YouTubeClient::new(&inputs.api_key, &api_base_url())
    })
    .await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
