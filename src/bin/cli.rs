//! CLI binary for shoppinator.

use clap::Parser;
use shop_scraper::{FravegaShop, Shop};
use shoppinator::{AppConfig, OutputFormat};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Shoppinator: find the cheapest listings for a product.
#[derive(Parser)]
#[command(name = "shoppinator", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Storefront URL or local HTML file to search instead of the configured one.
    #[arg(long)]
    source: Option<String>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,

    /// Product name to search for.
    #[arg(required_unless_present = "write_config")]
    term: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        config.scraper.base_source = source;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    // Logs go to stderr so JSON output stays pipeable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    if cli.write_config {
        let path = cli.config.unwrap_or_else(AppConfig::default_config_path);
        config.save_to_file(&path)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let term = cli.term.join(" ");
    let cancel = CancellationToken::new();
    let shop = FravegaShop::new(&config.scraper)?.with_cancel_token(cancel.clone());

    // Handle Ctrl+C
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, stopping search...");
            cancel_clone.cancel();
        }
    });

    info!(term = %term, store = shop.name(), source = %config.scraper.base_source, "searching");
    let results = shop.search(&term).await;
    if cancel.is_cancelled() {
        anyhow::bail!("search interrupted");
    }

    info!(count = results.len(), "search complete");
    print!("{}", shoppinator::output::render(&results, config.format)?);

    Ok(())
}
