//! Bikeshare Dashboard - bike-sharing rental dashboard generator
//!
//! A CLI tool that loads the daily and hourly bike-rental tables,
//! summarises them by season, hour and weather, and renders the
//! results as a standalone HTML dashboard (or Markdown / JSON).
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing file, missing column, config, write failure)

mod analysis;
mod cli;
mod config;
mod data;
mod models;
mod report;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::Config;
use data::Dataset;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Bikeshare Dashboard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Dashboard generation failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .bikeshare.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE);
    println!("   Edit it to customize data paths, colours, and output.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load, summarise, render, write.
fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    // Step 1: Load both tables
    let dataset = Dataset::load(
        &config.data.day_path,
        &config.data.hour_path,
        !args.quiet,
    )
    .context("Failed to load rental data")?;

    // Step 2: Compute summaries
    let dashboard = analysis::build_dashboard(&dataset);

    // Step 3: Render
    let output = match config.general.format {
        OutputFormat::Html => report::generate_html_report(&dashboard, &config.render),
        OutputFormat::Markdown => report::generate_markdown_report(&dashboard, &config.render),
        OutputFormat::Json => report::generate_json_report(&dashboard)?,
    };

    std::fs::write(&config.general.output, &output)
        .with_context(|| format!("Failed to write dashboard to {}", config.general.output))?;

    if !args.quiet {
        println!("\n📊 Rental Summary:");
        println!(
            "   Days: {} | Hours: {}",
            dataset.daily.len(),
            dataset.hourly.len()
        );
        println!(
            "   Total: {} | Members: {} | Non-members: {}",
            report::format_count(dashboard.totals.total),
            report::format_count(dashboard.totals.registered),
            report::format_count(dashboard.totals.casual)
        );
        println!("   Duration: {:.2}s", start_time.elapsed().as_secs_f64());
        println!(
            "\n✅ Dashboard saved to: {}",
            config.general.output
        );
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
