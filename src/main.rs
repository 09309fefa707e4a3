//! Doxygen-Harvest main entry point
//!
//! Command-line interface for harvesting a Doxygen API reference.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use doxygen_harvest::config::{load_config_with_hash, Config};
use doxygen_harvest::crawler::{EntityCatalog, Harvester, HttpFetcher};
use doxygen_harvest::model::EntityDescriptor;
use doxygen_harvest::output::stats::log_run_summary;
use doxygen_harvest::output::{print_statistics, FileOutputHandler, GLOBAL_NAMESPACE};
use doxygen_harvest::progress::{CsvProgressStore, ProgressStore};
use doxygen_harvest::HarvestError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Doxygen-Harvest: structured API reference extraction
///
/// Reads a Doxygen-generated documentation site and writes one Markdown and
/// one JSON file per documented type. Progress is saved after every type, so
/// an interrupted harvest continues where it stopped.
#[derive(Parser, Debug)]
#[command(name = "doxygen-harvest")]
#[command(version)]
#[command(about = "Harvests API reference data from Doxygen sites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = "config.toml")]
    config: PathBuf,

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
    /// Harvest pending entities, resuming previous progress
    Scrape {
        /// Maximum number of entities to process
        #[arg(long)]
        limit: Option<usize>,

        /// Discard previous progress and start over
        #[arg(long)]
        fresh: bool,
    },

    /// Show harvest progress
    Status,

    /// Reset progress from the current entity list
    ResetProgress,

    /// Harvest a single entity by full or simple name
    ScrapeClass {
        /// Entity name, e.g. "Sound" or "SharpKmyAudio.Sound"
        name: String,
    },

    /// List entities grouped by namespace
    ListClasses {
        /// Ignore the cached entity list
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::debug!("Configuration hash: {}", config_hash);

    match cli.command {
        Command::Scrape { limit, fresh } => handle_scrape(&config, limit, fresh).await,
        Command::Status => handle_status(&config),
        Command::ResetProgress => handle_reset(&config).await,
        Command::ScrapeClass { name } => handle_scrape_class(&config, &name).await,
        Command::ListClasses { force } => handle_list(&config, force).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("doxygen_harvest=info,warn"),
            1 => EnvFilter::new("doxygen_harvest=debug,info"),
            2 => EnvFilter::new("doxygen_harvest=trace,debug"),
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

fn build_parts(config: &Config) -> Result<(HttpFetcher, EntityCatalog, CsvProgressStore)> {
    let fetcher = HttpFetcher::new(&config.site, &config.scraping)
        .context("Failed to build HTTP fetcher")?;
    let catalog = EntityCatalog::new(
        config.output.entity_cache.clone(),
        config.site.listing_page.clone(),
        config.locator.scheme(),
    );
    let store = CsvProgressStore::new(config.output.progress_file.clone());
    Ok((fetcher, catalog, store))
}

async fn handle_scrape(config: &Config, limit: Option<usize>, fresh: bool) -> Result<()> {
    let (fetcher, catalog, store) = build_parts(config)?;
    let output = FileOutputHandler::from_config(&config.output, &config.site);

    if fresh {
        tracing::info!("Starting fresh harvest (ignoring previous progress)");
    }

    let entities = if fresh || !store.exists() {
        catalog
            .load(&fetcher, false)
            .await
            .context("Failed to load entity list")?
    } else {
        Vec::new()
    };

    let mut harvester = Harvester::new(fetcher, store, output);
    harvester.prepare(&entities, fresh)?;

    let summary = harvester.run(limit).await?;
    log_run_summary(&summary);

    Ok(())
}

fn handle_status(config: &Config) -> Result<()> {
    let store = CsvProgressStore::new(config.output.progress_file.clone());

    if !store.exists() {
        println!("Progress file not found. Run 'scrape' to initialize.");
        return Ok(());
    }

    println!("Progress file: {}\n", store.path().display());
    let stats = store.statistics()?;
    print_statistics(&stats);

    Ok(())
}

async fn handle_reset(config: &Config) -> Result<()> {
    let (fetcher, catalog, mut store) = build_parts(config)?;

    if store.exists() {
        println!("Resetting progress file: {}", store.path().display());
    } else {
        println!("Progress file does not exist, creating it");
    }

    let entities = catalog
        .load(&fetcher, false)
        .await
        .context("Failed to load entity list")?;
    store.initialize(&entities)?;

    let stats = store.statistics()?;
    println!("\nProgress reset: {} entities", stats.total);
    println!("Run 'doxygen-harvest scrape' to start harvesting");

    Ok(())
}

async fn handle_scrape_class(config: &Config, name: &str) -> Result<()> {
    let (fetcher, catalog, store) = build_parts(config)?;
    let output = FileOutputHandler::from_config(&config.output, &config.site);

    let entities = catalog
        .load(&fetcher, false)
        .await
        .context("Failed to load entity list")?;

    let target = entities
        .iter()
        .find(|e| e.full_name == name || e.name == name)
        .ok_or_else(|| HarvestError::EntityNotFound(name.to_string()))?;

    tracing::info!("Harvesting {}...", target.full_name);
    let markdown_path = output.markdown_path(&target.full_name);

    let harvester = Harvester::new(fetcher, store, output);
    harvester.harvest_one(target).await?;

    println!("Saved to {}", markdown_path.display());
    Ok(())
}

async fn handle_list(config: &Config, force: bool) -> Result<()> {
    let (fetcher, catalog, _) = build_parts(config)?;

    let entities = catalog
        .load(&fetcher, force)
        .await
        .context("Failed to load entity list")?;

    let mut by_namespace: BTreeMap<&str, Vec<&EntityDescriptor>> = BTreeMap::new();
    for entity in &entities {
        let namespace = if entity.namespace.is_empty() {
            GLOBAL_NAMESPACE
        } else {
            entity.namespace.as_str()
        };
        by_namespace.entry(namespace).or_default().push(entity);
    }

    for (namespace, members) in &by_namespace {
        println!("\n{} ({})", namespace, members.len());
        for entity in members {
            println!("  [{}] {}", entity.kind, entity.name);
        }
    }

    println!("\nTotal: {} entities", entities.len());
    Ok(())
}
