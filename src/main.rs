//! jroller-backup main entry point
//!
//! This is the command-line interface for backing up a JRoller.com blog
//! from its atom feed.

use clap::Parser;
use jroller_backup::config::{load_config_with_hash, Config};
use jroller_backup::fetch::{build_http_client, fetch_all_pages};
use jroller_backup::merge::merge_pages;
use jroller_backup::storage::{FlatFileStore, PageStore};
use jroller_backup::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// jroller-backup: atom feed backup for JRoller.com blogs
///
/// Downloads the paginated atom feed with comments page by page, following
/// the date cursor embedded in each page, then merges every page into a
/// single de-duplicated backup document.
#[derive(Parser, Debug)]
#[command(name = "jroller-backup")]
#[command(version = "1.0.0")]
#[command(about = "Backs up a JRoller.com blog from its atom feed", long_about = None)]
struct Cli {
    /// Full URL of the atom feed (with comments) on JRoller.com
    #[arg(value_name = "FEED_URL")]
    feed_url: String,

    /// Prefix for the page files and the merged output file
    #[arg(value_name = "PREFIX", default_value = "jroller_bak")]
    prefix: String,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Download the pages but skip the merge step
    #[arg(long, conflicts_with = "merge_only")]
    fetch_only: bool,

    /// Merge this many previously downloaded pages without fetching
    #[arg(long, value_name = "COUNT", value_parser = clap::value_parser!(u32).range(1..), conflicts_with = "fetch_only")]
    merge_only: Option<u32>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Every failure is fatal; the error class picks the exit status
    if let Err(e) = run(cli).await {
        tracing::error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load the configuration, or fall back to the defaults
    let config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!(
                "Configuration loaded from {} (hash: {})",
                path.display(),
                hash
            );
            config
        }
        None => Config::default(),
    };

    let store = FlatFileStore::new(&config.output.directory, &cli.prefix);

    let page_count = match cli.merge_only {
        Some(count) => {
            tracing::info!("Skipping fetch, merging {} existing page(s)", count);
            count
        }
        None => {
            let client = build_http_client(&config.http)?;
            let count = fetch_all_pages(&client, &cli.feed_url, &store).await?;
            tracing::info!("Fetched {} page(s)", count);
            count
        }
    };

    if cli.fetch_only {
        println!("{} page(s) downloaded with prefix {}", page_count, cli.prefix);
        return Ok(());
    }

    let document = merge_pages(&store, page_count)?;
    store.save_merged(&document)?;
    tracing::info!("{} saved", store.merged_path().display());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("jroller_backup=info,warn"),
            1 => EnvFilter::new("jroller_backup=debug,info"),
            2 => EnvFilter::new("jroller_backup=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
