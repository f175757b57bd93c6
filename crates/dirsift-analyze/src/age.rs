//! Age-based file partitioning.
//!
//! Splits a flat file list into "old" and "kept" by last-modified
//! timestamp. A file is old iff its mtime is strictly before
//! `reference_time - threshold`; a file sitting exactly at the cutoff
//! is kept. A file whose mtime cannot be read (vanished mid-scan) is
//! kept, never an error.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use derive_builder::Builder;
use tracing::debug;

/// Seconds in a day, for day-based thresholds.
const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Configuration for age partitioning.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct AgeConfig {
    /// Reference time for age calculations (default: now).
    #[builder(default = "SystemTime::now()")]
    pub reference_time: SystemTime,

    /// Minimum age for a file to be classified old.
    pub threshold: Duration,
}

impl AgeConfig {
    /// Create a new config builder.
    pub fn builder() -> AgeConfigBuilder {
        AgeConfigBuilder::default()
    }

    /// Config with a threshold of `days` days, referenced to now.
    pub fn days(days: u64) -> Self {
        Self {
            reference_time: SystemTime::now(),
            threshold: Duration::from_secs(days * SECS_PER_DAY),
        }
    }
}

/// Result of an age partition.
#[derive(Debug, Clone, Default)]
pub struct AgePartition {
    /// Files modified strictly before the cutoff.
    pub old: Vec<PathBuf>,
    /// Everything else, unreadable entries included.
    pub kept: Vec<PathBuf>,
}

impl AgePartition {
    /// Total number of partitioned files.
    pub fn total(&self) -> usize {
        self.old.len() + self.kept.len()
    }
}

/// Partition `entries` into old vs kept against `config`.
pub fn partition_by_age(
    entries: impl IntoIterator<Item = PathBuf>,
    config: &AgeConfig,
) -> AgePartition {
    // A threshold reaching past the epoch means nothing can be old.
    let cutoff = config.reference_time.checked_sub(config.threshold);

    let mut partition = AgePartition::default();
    for path in entries {
        let modified = match std::fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "mtime unreadable, keeping file");
                partition.kept.push(path);
                continue;
            }
        };

        match cutoff {
            Some(cutoff) if modified < cutoff => partition.old.push(path),
            _ => partition.kept.push(path),
        }
    }

    partition
}
