//! Portal-Mirror main entry point
//!
//! This is the command-line interface for the Portal-Mirror document-tree
//! downloader.

use clap::Parser;
use portal_mirror::config::{load_config_with_hash, Config};
use portal_mirror::crawler::{run_discovery, run_mirror};
use portal_mirror::mirror::MirrorWriter;
use portal_mirror::output::{print_summary, print_tree};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Portal-Mirror: a document-tree mirror for portal navigation menus
///
/// Portal-Mirror walks the navigation menu of an authenticated portal from a
/// root article, collects every article below it, and downloads the
/// documents linked from each article into one directory per article.
#[derive(Parser, Debug)]
#[command(name = "portal-mirror")]
#[command(version)]
#[command(about = "Mirror a portal's document tree", long_about = None)]
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

    /// Discover the tree and show where each node would be written, without downloading
    #[arg(long)]
    dry_run: bool,

    /// Override the output root from the configuration
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(output) = cli.output {
        tracing::info!("Output root overridden: {}", output.display());
        config.output.root = output;
    }

    if cli.dry_run {
        handle_dry_run(&config).await?;
    } else {
        handle_mirror(&config).await?;
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
            0 => EnvFilter::new("portal_mirror=info,warn"),
            1 => EnvFilter::new("portal_mirror=debug,info"),
            2 => EnvFilter::new("portal_mirror=trace,debug"),
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

/// Handles the --dry-run mode: discovers the tree and prints target directories
async fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Portal-Mirror Dry Run ===\n");

    println!("Portal:");
    println!("  Root: {}", config.portal.root_url);
    println!("  Session state: {}", config.portal.session_state.display());
    println!();

    println!("Crawler:");
    println!("  Request delay: {}ms", config.crawler.request_delay);
    println!("  Menu timeout: {}ms", config.crawler.menu_timeout);
    println!("  Root menu timeout: {}ms", config.crawler.root_menu_timeout);
    println!("  Excluded labels: {:?}", config.crawler.excluded_labels);
    println!();

    println!("Output:");
    println!("  Root: {}", config.output.root.display());
    println!();

    let (nodes, ctx) = match run_discovery(config).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Discovery failed: {}", e);
            return Err(e.into());
        }
    };

    print_tree(&nodes, &MirrorWriter::new(&config.output.root));

    println!();
    println!(
        "✓ Would download resources of {} nodes ({} excluded)",
        nodes.len(),
        ctx.nodes_excluded
    );

    Ok(())
}

/// Handles the main mirror operation
async fn handle_mirror(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Mirroring tree from {}", config.portal.root_url);

    match run_mirror(config).await {
        Ok(ctx) => {
            print_summary(&ctx);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Mirror run failed: {}", e);
            Err(e.into())
        }
    }
}
