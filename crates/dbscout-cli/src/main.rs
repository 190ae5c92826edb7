use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dbscout_core::Config;
use dbscout_manifest::{HttpManifestSource, ManifestSource, StaticManifestSource};
use dbscout_scan::{ExtractionStats, Pipeline};

/// dbscout - inventory the database behind every pricing site
#[derive(Parser)]
#[command(name = "dbscout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: dbscout.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (overrides the config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read the manifest envelope from a file instead of the manifest URL
    #[arg(short = 'm', long)]
    manifest_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let mut config = load_config(cli.config.as_deref(), cli.verbose)?;
    if let Some(output) = cli.output {
        config.output = output;
    }

    if cli.verbose {
        eprintln!("{} {}", "Share root:".cyan(), config.share_root.display());
    }

    let source: Box<dyn ManifestSource> = match &cli.manifest_file {
        Some(path) => Box::new(StaticManifestSource::from_file(path)?),
        None => Box::new(HttpManifestSource::new(config.manifest_url.clone())),
    };

    if cli.verbose {
        eprintln!("{} {} manifest...", "Fetching".cyan(), source.name());
    }

    let records = source.fetch().await.map_err(|e| {
        tracing::error!(source = source.name(), "Unable to fetch manifest: {}", e);
        e
    })?;

    if cli.verbose {
        eprintln!("{} {} records", "Fetched".cyan(), records.len());
    }

    let (inventory, stats) = Pipeline::from_config(&config).run(records);

    print_summary(&stats, inventory.len(), cli.verbose);

    let written = inventory
        .save_to_file(&config.output)
        .context("Failed to write inventory")?;

    println!("{} {}", "File written to:".green(), written.display());

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Explicit config, then ./dbscout.toml, then defaults
fn load_config(path: Option<&Path>, verbose: bool) -> Result<Config> {
    if let Some(path) = path {
        return Ok(Config::from_file(path)?);
    }

    let local = Path::new("dbscout.toml");
    if local.exists() {
        return Ok(Config::from_file(local)?);
    }

    if verbose {
        eprintln!("{}", "No config file found, using defaults".yellow());
    }
    Ok(Config::default())
}

/// Print found counts relative to every fetched record
fn print_summary(stats: &ExtractionStats, kept: usize, verbose: bool) {
    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "Site Database Inventory".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!(
        "Found {} ({:.1}%) database names and {} ({:.1}%) table names out of {} items.",
        stats.db_names_found,
        stats.db_name_rate() * 100.0,
        stats.tables_found,
        stats.table_rate() * 100.0,
        stats.records
    );

    if kept > 0 {
        println!("  Sites kept:    {}", kept.to_string().green());
    } else {
        println!("  Sites kept:    {}", kept.to_string().yellow());
    }

    if verbose {
        println!("  Sites scanned: {}", stats.records_scanned);
        println!("  Files read:    {}", stats.files_read);

        if stats.directory_failures > 0 {
            println!("  Unlistable folders: {}", stats.directory_failures.to_string().red());
        }
        if stats.file_failures > 0 {
            println!("  Unreadable files:   {}", stats.file_failures.to_string().red());
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from(["dbscout", "-o", "inventory.json", "--manifest-file", "db_list.txt", "-v"]);
        assert_eq!(cli.output, Some(PathBuf::from("inventory.json")));
        assert_eq!(cli.manifest_file, Some(PathBuf::from("db_list.txt")));
        assert!(cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        assert!(load_config(Some(Path::new("no/such/dbscout.toml")), false).is_err());
    }
}
