use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use typed_scss::cli::Cli;
use typed_scss::{Settings, logging, mode};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Settings::load().context("failed to load configuration")?,
    };
    cli.apply(&mut settings);

    if cli.show_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    logging::init(&settings);

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.cancel();
        }
    });

    mode::run(&settings, cancel).await?;
    Ok(())
}
