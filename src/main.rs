//! Tutorial Forge main entry point
//!
//! This is the command-line interface for the Tutorial Forge service.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use tutorial_forge::config::{load_config_with_hash, Config};
use tutorial_forge::output::write_bundle;
use tutorial_forge::pipeline::{GenerateRequest, LogSink, Pipeline};
use tutorial_forge::server;

/// Tutorial Forge: documentation sites in, tutorial outlines out
///
/// Tutorial Forge crawls a documentation site, asks a language model for
/// tutorial ideas grounded in what it found, and renders a Markdown scaffold
/// plus a CSV index for each run. By default it serves the HTTP API.
#[derive(Parser, Debug)]
#[command(name = "tutorial-forge")]
#[command(version)]
#[command(about = "Turns documentation sites into tutorial scaffolds", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the effective settings without serving
    #[arg(long, conflicts_with = "generate")]
    dry_run: bool,

    /// Run one generation for this documentation URL instead of serving
    #[arg(long, value_name = "URL", requires = "out")]
    generate: Option<String>,

    /// Page budget for --generate (defaults to the configured value)
    #[arg(long, value_name = "N", requires = "generate")]
    max_pages: Option<i64>,

    /// Directory that receives the scaffolds, CSV index and README
    #[arg(long, value_name = "DIR", requires = "generate")]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let api_key = config.api_key();
    let pipeline = Pipeline::new(config, api_key).context("Failed to initialize pipeline")?;

    match (cli.generate, cli.out) {
        (Some(url), Some(out)) => handle_generate(pipeline, url, cli.max_pages, out).await,
        _ => handle_serve(pipeline).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tutorial_forge=info,warn"),
            1 => EnvFilter::new("tutorial_forge=debug,info"),
            2 => EnvFilter::new("tutorial_forge=trace,debug"),
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

/// Handles the --dry-run mode: prints the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Tutorial Forge Dry Run ===\n");

    println!("Server:");
    println!("  Bind address: {}", config.server.bind_address);
    println!("  Max duration: {}s", config.server.max_duration_secs);

    println!("\nCrawler:");
    println!(
        "  Page budget: {} (limit {})",
        config.crawler.default_max_pages, config.crawler.max_pages_limit
    );
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Content ceiling: {} chars", config.crawler.content_max_chars);
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nAnalyzer:");
    println!("  Model: {}", config.analyzer.model);
    println!("  API: {}", config.analyzer.api_base_url);
    println!(
        "  Batches: {} pages, {}ms apart",
        config.analyzer.batch_size, config.analyzer.batch_delay_ms
    );
    println!("  Preview: {} chars", config.analyzer.preview_chars);

    let credential = if config.api_key().is_some() {
        "present"
    } else {
        "MISSING"
    };
    println!(
        "  Credential (${}): {}",
        config.analyzer.api_key_env, credential
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the default mode: serves the HTTP API
async fn handle_serve(pipeline: Pipeline) -> anyhow::Result<()> {
    let bind_address = pipeline.config().server.bind_address.clone();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    server::serve(listener, pipeline).await?;
    Ok(())
}

/// Handles the --generate mode: one buffered run written to a directory
async fn handle_generate(
    pipeline: Pipeline,
    url: String,
    max_pages: Option<i64>,
    out: PathBuf,
) -> anyhow::Result<()> {
    tracing::info!("Generating tutorials for {}", url);

    let request = GenerateRequest::new(url.clone(), max_pages);
    let result = pipeline.run(request, Arc::new(LogSink)).await?;

    let written = write_bundle(&out, &url, &result)
        .with_context(|| format!("Failed to write output to {}", out.display()))?;

    println!(
        "✓ {} tutorials from {} pages (total estimated cost: ${})",
        result.stats.tutorials_generated,
        result.stats.pages_crawled,
        result.stats.total_estimated_cost
    );
    for path in written {
        println!("  {}", path.display());
    }

    Ok(())
}
