//! dirsift - directory tree enumeration, duplicate detection and
//! aged-file cleanup.
//!
//! Usage:
//!   dirsift find [PATH]        List files matching a pattern
//!   dirsift duplicates [PATH]  Group files by identical content
//!   dirsift old [PATH]         List files older than a threshold
//!   dirsift cleanup [PATH]     Delete files older than a threshold
//!   dirsift --help             Show help

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use dirsift_analyze::{DuplicateConfig, DuplicateFinder};
use dirsift_core::WalkConfig;
use dirsift_ops::{CleanupConfig, cleanup, old_files};
use dirsift_walk::find_files;

#[derive(Parser)]
#[command(
    name = "dirsift",
    version,
    about = "Sift directory trees: find, deduplicate, clean up",
    long_about = "dirsift enumerates files under a directory and classifies them:\n\
                  matching a glob, sharing identical content, or aged past a threshold.\n\
                  Set RUST_LOG to see skipped entries and other diagnostics."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List files matching a pattern
    Find {
        /// Directory to search
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Glob matched against file names
        #[arg(short, long, default_value = "*")]
        pattern: String,

        /// Do not descend into subdirectories
        #[arg(long)]
        no_recursive: bool,

        /// Include hidden files and directories
        #[arg(long)]
        hidden: bool,

        /// Maximum descent depth (files directly in PATH are depth 0)
        #[arg(short = 'd', long)]
        max_depth: Option<u32>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Group files by identical content
    Duplicates {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Do not descend into subdirectories
        #[arg(long)]
        no_recursive: bool,

        /// Minimum file size in bytes to consider
        #[arg(short, long, default_value = "0")]
        min_size: u64,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List files older than a threshold
    Old {
        /// Directory to search
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Age threshold in days
        #[arg(long)]
        days: u64,

        /// Glob matched against file names
        #[arg(short, long, default_value = "*")]
        pattern: String,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete files older than a threshold
    Cleanup {
        /// Directory to clean
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Age threshold in days
        #[arg(long)]
        days: u64,

        /// Glob matched against file names
        #[arg(short, long, default_value = "*")]
        pattern: String,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// List deletion candidates without removing them
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Find {
            path,
            pattern,
            no_recursive,
            hidden,
            max_depth,
            format,
        } => {
            let config = WalkConfig::builder()
                .pattern(pattern)
                .recursive(!no_recursive)
                .include_hidden(hidden)
                .max_depth(max_depth)
                .build()?;
            run_find(&path, &config, format)?;
        }
        Command::Duplicates {
            path,
            no_recursive,
            min_size,
            format,
        } => {
            let config = DuplicateConfig::builder()
                .recursive(!no_recursive)
                .min_size(min_size)
                .build()?;
            run_duplicates(&path, config, format)?;
        }
        Command::Old {
            path,
            days,
            pattern,
            recursive,
            format,
        } => {
            let config = CleanupConfig::builder()
                .threshold_days(days)
                .pattern(pattern)
                .recursive(recursive)
                .build()?;
            run_old(&path, &config, format)?;
        }
        Command::Cleanup {
            path,
            days,
            pattern,
            recursive,
            dry_run,
        } => {
            let config = CleanupConfig::builder()
                .threshold_days(days)
                .pattern(pattern)
                .recursive(recursive)
                .build()?;
            run_cleanup(&path, &config, dry_run)?;
        }
    }

    Ok(())
}

/// List matching files, one per line.
fn run_find(path: &PathBuf, config: &WalkConfig, format: OutputFormat) -> Result<()> {
    let files = find_files(path, config)?;

    match format {
        OutputFormat::Text => {
            for file in &files {
                println!("{}", file.display());
            }
            eprintln!("{} file(s)", files.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&files)?);
        }
    }

    Ok(())
}

/// Scan for duplicate groups and print them.
fn run_duplicates(path: &PathBuf, config: DuplicateConfig, format: OutputFormat) -> Result<()> {
    eprintln!("Scanning {}...", path.display());

    let report = DuplicateFinder::with_config(config).find_duplicates(path)?;

    match format {
        OutputFormat::Text => {
            if !report.has_duplicates() {
                println!("No duplicate files found ({} scanned).", report.files_scanned);
                return Ok(());
            }

            println!(
                "Found {} duplicate group(s) across {} file(s), {} reclaimable",
                report.group_count(),
                report.duplicate_file_count(),
                format_size(report.total_wasted_bytes)
            );
            println!();

            for (i, group) in report.groups.iter().enumerate() {
                println!(
                    "Group {} ({} files, {} each, {} wasted)",
                    i + 1,
                    group.count(),
                    format_size(group.size),
                    format_size(group.wasted_bytes)
                );
                for path in &group.paths {
                    println!("  {}", path.display());
                }
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// List deletion candidates without touching them.
fn run_old(path: &PathBuf, config: &CleanupConfig, format: OutputFormat) -> Result<()> {
    let files = old_files(path, config)?;

    match format {
        OutputFormat::Text => {
            for file in &files {
                println!("{}", file.display());
            }
            eprintln!(
                "{} file(s) older than {} day(s)",
                files.len(),
                config.threshold_days
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&files)?);
        }
    }

    Ok(())
}

/// Delete aged files, or list them with --dry-run.
fn run_cleanup(path: &PathBuf, config: &CleanupConfig, dry_run: bool) -> Result<()> {
    if dry_run {
        let files = old_files(path, config)?;
        for file in &files {
            println!("would delete {}", file.display());
        }
        println!("{} file(s) would be deleted", files.len());
        return Ok(());
    }

    let report = cleanup(path, config)?;
    println!(
        "Deleted {} of {} examined file(s){}",
        report.deleted,
        report.examined,
        if report.failed > 0 {
            format!(", {} failed", report.failed)
        } else {
            String::new()
        }
    );

    Ok(())
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
