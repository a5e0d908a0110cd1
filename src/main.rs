#![warn(clippy::all, clippy::pedantic)]

use anyhow::{Context, Result};
use clap::Parser;
use lexichat::Config;
use lexichat::app::dispatch::dispatch;
use lexichat::cli::Cli;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_or_init_at(path)?,
        None => Config::load_or_init()?,
    };
    if let Some(url) = &cli.backend_url {
        config.backend.base_url.clone_from(url);
        config.validate()?;
    }

    // stdout is reserved for answers; logs go to stderr.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.observability.level().unwrap_or(Level::INFO))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    dispatch(cli, Arc::new(config)).await
}
