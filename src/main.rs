//! Site-Harvest main entry point
//!
//! This is the command-line interface for the Site-Harvest pipeline.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use site_harvest::config::{load_config_with_hash, load_seeds, validate, Config};
use site_harvest::crawler::crawl_sites;
use site_harvest::extract::extract_all;
use site_harvest::knowledge::{build_documents, write_documents};
use site_harvest::output::{
    merge_all, print_crawl_reports, print_extraction_reports, print_merge_reports,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Site-Harvest: website content harvester for a knowledge base
///
/// Site-Harvest crawls each seed website within its own host, extracts
/// readable text from every discovered page, merges it per domain and
/// prepares documents for a retrieval-augmented chatbot.
#[derive(Parser, Debug)]
#[command(name = "site-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Website content harvester for a knowledge base", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Pipeline stage to run
    #[arg(long, value_enum, default_value_t = Stage::All)]
    stage: Stage,

    /// Validate config and show what would run without touching the network
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Stage {
    /// Discover links for every seed
    Crawl,
    /// Extract text from every discovered link
    Extract,
    /// Merge page text per domain
    Merge,
    /// Build knowledge-base documents
    Documents,
    /// Every stage in order
    All,
}

impl Stage {
    fn includes(self, stage: Stage) -> bool {
        self == Stage::All || self == stage
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(cli.config.as_deref())?;

    if cli.dry_run {
        return handle_dry_run(&config, cli.stage);
    }

    if cli.stage.includes(Stage::Crawl) {
        handle_crawl(&config).await?;
    }
    if cli.stage.includes(Stage::Extract) {
        handle_extract(&config).await?;
    }
    if cli.stage.includes(Stage::Merge) {
        handle_merge(&config)?;
    }
    if cli.stage.includes(Stage::Documents) {
        handle_documents(&config)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_harvest=info,warn"),
            1 => EnvFilter::new("site_harvest=debug,info"),
            2 => EnvFilter::new("site_harvest=trace,debug"),
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

/// Loads the configuration file, or validated defaults when none is given
fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        let config = Config::default();
        validate(&config)?;
        return Ok(config);
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Handles the --dry-run mode: validates inputs and shows what would run
fn handle_dry_run(config: &Config, stage: Stage) -> anyhow::Result<()> {
    println!("=== Site-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Request delay: {}ms", config.crawler.request_delay);
    println!("  Request timeout: {}ms", config.crawler.request_timeout);

    println!("\nExtractor Configuration:");
    println!("  Request delay: {}ms", config.extractor.request_delay);
    println!("  Request timeout: {}ms", config.extractor.request_timeout);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header);

    println!("\nPaths:");
    println!("  Websites: {}", config.paths.websites);
    println!("  Links: {}", config.paths.href_dir);
    println!("  Page data: {}", config.paths.data_dir);
    println!("  Merged content: {}", config.paths.structured_dir);
    println!("  Documents: {}", config.paths.documents);

    println!("\nStage: {:?}", stage);

    if stage.includes(Stage::Crawl) || stage.includes(Stage::Documents) {
        let seeds = load_seeds(Path::new(&config.paths.websites))
            .with_context(|| format!("Failed to read seeds from {}", config.paths.websites))?;
        println!("\nSeeds ({}):", seeds.len());
        for seed in &seeds {
            println!("  - {}", seed);
        }
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the crawl stage
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let seeds = load_seeds(Path::new(&config.paths.websites))
        .with_context(|| format!("Failed to read seeds from {}", config.paths.websites))?;
    tracing::info!("Starting link collection for {} seed(s)", seeds.len());

    let reports = crawl_sites(config, &seeds).await?;
    print_crawl_reports(&reports);

    tracing::info!("Link collection complete");
    Ok(())
}

/// Handles the extract stage
async fn handle_extract(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Starting content extraction");

    let reports = extract_all(config).await?;
    print_extraction_reports(&reports);

    tracing::info!("Content extraction complete");
    Ok(())
}

/// Handles the merge stage
fn handle_merge(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Starting content merging");

    let reports = merge_all(
        Path::new(&config.paths.data_dir),
        Path::new(&config.paths.structured_dir),
    )?;
    print_merge_reports(&reports);

    tracing::info!("Content merging complete");
    Ok(())
}

/// Handles the documents stage
fn handle_documents(config: &Config) -> anyhow::Result<()> {
    let seeds = load_seeds(Path::new(&config.paths.websites))
        .with_context(|| format!("Failed to read seeds from {}", config.paths.websites))?;

    let documents = build_documents(Path::new(&config.paths.structured_dir), &seeds)?;
    if documents.is_empty() {
        println!("No documents to write.");
        return Ok(());
    }

    let path = Path::new(&config.paths.documents);
    write_documents(path, &documents)?;
    println!("✓ Wrote {} documents to {}", documents.len(), path.display());

    Ok(())
}
