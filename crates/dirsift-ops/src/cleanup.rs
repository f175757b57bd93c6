//! Best-effort removal of aged files.

use std::fs;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use dirsift_analyze::age::{AgeConfig, partition_by_age};
use dirsift_core::{WalkConfig, WalkError};
use dirsift_walk::find_files;

/// Configuration for an aged-file cleanup.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct CleanupConfig {
    /// Files modified strictly earlier than this many days ago are
    /// deletion candidates.
    pub threshold_days: u64,

    /// Glob restricting which file names are considered.
    #[builder(default = "String::from(\"*\")")]
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Descend into subdirectories. Off by default: cleanup targets a
    /// single directory unless the caller opts in.
    #[builder(default = "false")]
    #[serde(default)]
    pub recursive: bool,
}

fn default_pattern() -> String {
    "*".to_string()
}

impl CleanupConfig {
    /// Create a new config builder.
    pub fn builder() -> CleanupConfigBuilder {
        CleanupConfigBuilder::default()
    }

    /// Config deleting files older than `days` days, any name.
    pub fn days(days: u64) -> Self {
        Self {
            threshold_days: days,
            pattern: default_pattern(),
            recursive: false,
        }
    }

    fn walk_config(&self) -> WalkConfig {
        WalkConfig {
            pattern: self.pattern.clone(),
            recursive: self.recursive,
            ..WalkConfig::default()
        }
    }
}

/// Outcome of a cleanup run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupReport {
    /// Files the enumeration produced.
    pub examined: u64,
    /// Files successfully deleted.
    pub deleted: u64,
    /// Deletion candidates that could not be removed.
    pub failed: u64,
}

/// List the files under `root` old enough to be deleted by
/// [`cleanup`], without deleting anything.
pub fn old_files(root: impl AsRef<Path>, config: &CleanupConfig) -> Result<Vec<PathBuf>, WalkError> {
    let entries = find_files(root, &config.walk_config())?;
    Ok(partition_by_age(entries, &AgeConfig::days(config.threshold_days)).old)
}

/// Delete files under `root` older than the configured threshold.
///
/// Enumerates, partitions by age, then deletes each candidate in turn.
/// A candidate that vanishes or cannot be removed is counted as failed
/// and the remaining candidates are still processed; failed deletions
/// are not retried. The report's `deleted` counts successful removals
/// only.
pub fn cleanup(root: impl AsRef<Path>, config: &CleanupConfig) -> Result<CleanupReport, WalkError> {
    let entries = find_files(root.as_ref(), &config.walk_config())?;
    let examined = entries.len() as u64;

    let partition = partition_by_age(entries, &AgeConfig::days(config.threshold_days));
    let (deleted, failed) = delete_files(&partition.old);

    info!(
        root = %root.as_ref().display(),
        examined,
        deleted,
        failed,
        "cleanup finished"
    );

    Ok(CleanupReport {
        examined,
        deleted,
        failed,
    })
}

/// Remove each file, best effort. Returns (deleted, failed) counts.
fn delete_files(paths: &[PathBuf]) -> (u64, u64) {
    let mut deleted = 0u64;
    let mut failed = 0u64;

    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => deleted += 1,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to delete file");
                failed += 1;
            }
        }
    }

    (deleted, failed)
}
