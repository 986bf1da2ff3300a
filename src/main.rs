use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use spotbook::config::{default_config_path, ResolvedConfig};
use spotbook::portfolio::render_table;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "spotbook")]
#[command(about = "Value a crypto portfolio against exchange spot prices")]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to ./spotbook.toml, then the XDG config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init();
    } else {
        tracing_subscriber::registry().with(filter).with(layer).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    // An explicit --config must exist; the default path may be absent.
    let config = match &cli.config {
        Some(path) => ResolvedConfig::load(path),
        None => ResolvedConfig::load_or_default(&default_config_path()),
    }
    .context("Failed to load spotbook config")?;

    let report = spotbook::app::run(&config).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("[ Cryptocurrency Portfolio ]");
        print!("{}", render_table(&report, &config.config.display));
    }

    Ok(())
}
