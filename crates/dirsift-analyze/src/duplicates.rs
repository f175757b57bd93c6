//! Duplicate file grouping by content digest.
//!
//! Files are enumerated through the walker, grouped by streaming
//! BLAKE3 digest, and every group with a single member is pruned.
//! An optional size pre-filter skips hashing files whose size is
//! unique; it cannot change the output, only the I/O spent.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use dirsift_core::{Digest, WalkConfig, WalkError};
use dirsift_walk::find_files;

use crate::hasher::digest_file;

/// Configuration for duplicate detection.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct DuplicateConfig {
    /// Recurse into subdirectories.
    #[builder(default = "true")]
    pub recursive: bool,

    /// Minimum file size to consider.
    #[builder(default = "0")]
    pub min_size: u64,

    /// Skip hashing files whose size matches no other file. Purely a
    /// performance toggle; groupings are identical either way.
    #[builder(default = "true")]
    pub size_prefilter: bool,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            min_size: 0,
            size_prefilter: true,
        }
    }
}

impl DuplicateConfig {
    /// Create a new config builder.
    pub fn builder() -> DuplicateConfigBuilder {
        DuplicateConfigBuilder::default()
    }
}

/// A group of files sharing the same content.
///
/// Invariant: every group holds at least two paths, in traversal order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Content digest shared by all files in this group.
    pub digest: Digest,

    /// Size of each file in bytes.
    pub size: u64,

    /// Paths of all files with this content.
    pub paths: Vec<PathBuf>,

    /// Space reclaimable by keeping one copy: size * (count - 1).
    pub wasted_bytes: u64,
}

impl DuplicateGroup {
    /// Number of files in this group.
    pub fn count(&self) -> usize {
        self.paths.len()
    }

    /// How many files could be removed while keeping one copy.
    pub fn redundant_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }
}

/// Results from a duplicate scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateReport {
    /// Duplicate groups in first-seen traversal order.
    pub groups: Vec<DuplicateGroup>,

    /// Files enumerated by the walk.
    pub files_scanned: u64,

    /// Files actually hashed.
    pub files_hashed: u64,

    /// Files dropped because their metadata or contents could not be
    /// read; they appear in no group.
    pub files_skipped: u64,

    /// Total reclaimable space across all groups.
    pub total_wasted_bytes: u64,
}

impl DuplicateReport {
    /// Check whether any duplicates were found.
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Number of duplicate groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of files across all groups.
    pub fn duplicate_file_count(&self) -> usize {
        self.groups.iter().map(|g| g.paths.len()).sum()
    }

    /// Consume the report into a digest-to-paths mapping, preserving
    /// group order.
    pub fn into_map(self) -> IndexMap<Digest, Vec<PathBuf>> {
        self.groups
            .into_iter()
            .map(|g| (g.digest, g.paths))
            .collect()
    }
}

/// Duplicate file finder.
pub struct DuplicateFinder {
    config: DuplicateConfig,
}

impl DuplicateFinder {
    /// Create a finder with the default config.
    pub fn new() -> Self {
        Self {
            config: DuplicateConfig::default(),
        }
    }

    /// Create a finder with a custom config.
    pub fn with_config(config: DuplicateConfig) -> Self {
        Self { config }
    }

    /// Find duplicate files under `root`.
    ///
    /// Hidden files are excluded and depth is unlimited (subject to
    /// the `recursive` toggle). A file whose size or contents cannot
    /// be read is logged and excluded from every group; it is never
    /// reported as a unique group of one.
    pub fn find_duplicates(&self, root: impl AsRef<Path>) -> Result<DuplicateReport, WalkError> {
        let walk_config = WalkConfig {
            recursive: self.config.recursive,
            ..WalkConfig::match_all()
        };

        let entries = find_files(root, &walk_config)?;
        let files_scanned = entries.len() as u64;
        let mut files_skipped = 0u64;

        // Stat pass, keeping traversal order.
        let mut sized: Vec<(PathBuf, u64)> = Vec::with_capacity(entries.len());
        for path in entries {
            match std::fs::metadata(&path) {
                Ok(meta) => {
                    if meta.len() >= self.config.min_size {
                        sized.push((path, meta.len()));
                    }
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable file");
                    files_skipped += 1;
                }
            }
        }

        // Size pre-filter: a file with a unique size cannot have a
        // content duplicate.
        let candidates: Vec<(PathBuf, u64)> = if self.config.size_prefilter {
            let mut size_counts: HashMap<u64, usize> = HashMap::new();
            for (_, size) in &sized {
                *size_counts.entry(*size).or_default() += 1;
            }
            sized
                .into_iter()
                .filter(|(_, size)| size_counts[size] > 1)
                .collect()
        } else {
            sized
        };

        let files_hashed = candidates.len() as u64;

        // Hash in parallel; collect() keeps input order so grouping
        // below still reflects traversal order.
        let digests: Vec<(PathBuf, u64, Option<Digest>)> = candidates
            .into_par_iter()
            .map(|(path, size)| {
                let digest = match digest_file(&path) {
                    Ok(digest) => Some(digest),
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "failed to hash file");
                        None
                    }
                };
                (path, size, digest)
            })
            .collect();

        let mut grouped: IndexMap<Digest, (u64, Vec<PathBuf>)> = IndexMap::new();
        for (path, size, digest) in digests {
            match digest {
                Some(digest) => grouped.entry(digest).or_insert((size, Vec::new())).1.push(path),
                None => files_skipped += 1,
            }
        }

        let groups: Vec<DuplicateGroup> = grouped
            .into_iter()
            .filter(|(_, (_, paths))| paths.len() > 1)
            .map(|(digest, (size, paths))| {
                let wasted_bytes = size * (paths.len() as u64 - 1);
                DuplicateGroup {
                    digest,
                    size,
                    paths,
                    wasted_bytes,
                }
            })
            .collect();

        let total_wasted_bytes = groups.iter().map(|g| g.wasted_bytes).sum();

        Ok(DuplicateReport {
            groups,
            files_scanned,
            files_hashed,
            files_skipped,
            total_wasted_bytes,
        })
    }
}

impl Default for DuplicateFinder {
    fn default() -> Self {
        Self::new()
    }
}
