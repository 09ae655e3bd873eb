use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use receipt_order::app::App;
use receipt_order::config::Config;
use receipt_order::logging;

/// Order entry and receipt printing for a small gimbap/ramyun counter
#[derive(Parser, Debug)]
#[command(name = "receipt-order")]
#[command(about = "Terminal order entry with receipt printing", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the orders database path
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Override the receipt spool file
    #[arg(long, value_name = "PATH")]
    print_spool: Option<PathBuf>,

    /// Override the diagnostics log file (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Some(spool) = args.print_spool {
        config.print_spool = spool;
    }
    if let Some(log_file) = args.log_file {
        config.log_file = log_file;
    }

    logging::init(&config.log_file)?;
    tracing::info!(?config, "starting receipt-order");

    let mut app = App::new(&config).context("initializing application")?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    tracing::info!("exiting");
    result
}
