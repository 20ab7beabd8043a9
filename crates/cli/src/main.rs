//! pustaka entry point.
//!
//! Without `--query` this opens the interactive search screen and logs to a
//! file. With `--query` it runs one search, prints the results and logs to
//! stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::runtime::Handle;

use pustaka_cli::{Controller, Worker, logging, plain, tui};
use pustaka_client::{BookSource, BooksClient, BooksConfig, Connectivity, LinkOpener, SystemOpener, TcpProbe};
use pustaka_core::AppConfig;

/// Search Google Books from the terminal.
#[derive(Debug, Parser)]
#[command(name = "pustaka", version, about)]
struct Args {
    /// Run a single search and print the results instead of opening the UI.
    #[arg(short, long)]
    query: Option<String>,

    /// Open result N (1-based) of the --query search in the browser.
    #[arg(long, value_name = "N", requires = "query")]
    open: Option<usize>,

    /// TOML configuration file (overrides PUSTAKA_CONFIG_FILE).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref()).context("load configuration")?;

    let _guard = match args.query {
        Some(_) => {
            logging::init_stderr(args.debug)?;
            None
        }
        None => Some(logging::init_file(&config.log_dir, args.debug)?),
    };

    tracing::info!(api = %config.api_base_url, "starting pustaka");

    let client = BooksClient::new(BooksConfig::from(&config)).context("build books client")?;
    let source: Arc<dyn BookSource> = Arc::new(client);
    let connectivity: Arc<dyn Connectivity> = Arc::new(TcpProbe::from(&config));
    let opener: Arc<dyn LinkOpener> = Arc::new(SystemOpener);

    let runtime = Handle::current();

    // The controller polls connectivity synchronously and the terminal loop
    // blocks on input, so both modes run off the async workers.
    tokio::task::spawn_blocking(move || {
        let controller = Controller::new(connectivity, opener);
        let (worker, outcomes) = Worker::new(source, runtime.clone());

        match args.query {
            Some(term) => {
                let mut stdout = std::io::stdout().lock();
                plain::run(controller, &worker, outcomes, runtime, &term, args.open, &mut stdout)
            }
            None => tui::run(controller, worker, outcomes),
        }
    })
    .await
    .context("search screen panicked")?
}
