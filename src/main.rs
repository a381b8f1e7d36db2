//! Relmap main entry point
//!
//! This is the command-line interface for the relmap identity web mapper.

use clap::{Parser, Subcommand};
use relmap::client::Client;
use relmap::config::{load_config, ClientConfig, Config};
use relmap::crawler::{Crawler, ProfileProcessor};
use relmap::metadata::read_page;
use relmap::output::{render_page_json, render_profiles_json, render_profiles_text};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Relmap: a rel=me identity web mapper
///
/// Relmap extracts page metadata (Open Graph, Dublin Core, Twitter Card)
/// and crawls rel=me link relations to discover the set of profile pages
/// that cross-reference each other.
#[derive(Parser, Debug)]
#[command(name = "relmap")]
#[command(version)]
#[command(about = "A rel=me identity web mapper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply without one)
    #[arg(long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one page and print its extracted metadata as JSON
    Meta {
        /// Page URL
        url: String,
    },

    /// Discover cross-referenced identity pages starting from a seed URL
    Profiles {
        /// Seed URL (typically one of your own profile pages)
        url: String,

        /// Print the profile list as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Meta { url } => handle_meta(&url, config.client).await,
        Command::Profiles { url, json } => handle_profiles(&url, json, config.client).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("relmap=info,warn"),
            1 => EnvFilter::new("relmap=debug,info"),
            2 => EnvFilter::new("relmap=trace,debug"),
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

/// Handles the `meta` command: fetch a page and print its metadata
async fn handle_meta(url: &str, config: ClientConfig) -> anyhow::Result<()> {
    let client = Client::with_config(config)?;

    let fetch = client.get(url).await?;
    tracing::debug!("Fetched {} ({} bytes)", fetch.final_url, fetch.body.len());

    let page = read_page(fetch.reader())?;
    println!("{}", render_page_json(&page)?);

    Ok(())
}

/// Handles the `profiles` command: crawl the rel=me web from a seed URL
async fn handle_profiles(url: &str, json: bool, config: ClientConfig) -> anyhow::Result<()> {
    let processor = Arc::new(ProfileProcessor::new());
    let client = Client::with_config(config)?;
    let crawler = Crawler::with_client(client, processor.clone());

    tracing::info!("Starting profile discovery from {}", url);
    crawler.run(url).await;

    let profiles = processor.profiles();
    tracing::info!("Discovered {} profile pages", profiles.len());

    if json {
        println!("{}", render_profiles_json(&profiles)?);
    } else {
        print!("{}", render_profiles_text(&profiles));
    }

    Ok(())
}
