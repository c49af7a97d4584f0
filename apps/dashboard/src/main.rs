mod cli;
mod config;
mod controller;
mod ui;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{normalize_base_url, StudentClient};
use tokio::io::{stdin, stdout, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{run_command, Args};
use config::load_settings;
use ui::app::DashboardApp;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        settings.api_base_url = normalize_base_url(base_url);
    }

    let client = match settings.request_timeout {
        Some(timeout) => StudentClient::with_timeout(&settings.api_base_url, timeout)
            .context("failed to build student api client")?,
        None => StudentClient::new(&settings.api_base_url),
    };
    info!(base_url = client.base_url(), "using student api");

    match args.command {
        Some(command) => {
            let output = run_command(&client, command).await?;
            println!("{}", output.trim_end());
        }
        None => {
            DashboardApp::new(client)
                .run(BufReader::new(stdin()), stdout())
                .await?;
        }
    }

    Ok(())
}
