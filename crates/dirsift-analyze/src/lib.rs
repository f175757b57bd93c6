//! Analysis for dirsift.
//!
//! This crate classifies the files a walk produces:
//!
//! - **Content hashing** - streaming BLAKE3 digests of file contents
//! - **Duplicate grouping** - group paths by digest, keep groups of 2+
//! - **Age partitioning** - split a file list into old vs kept by mtime
//!
//! # Duplicate detection
//!
//! ```rust,ignore
//! use dirsift_analyze::DuplicateFinder;
//!
//! let report = DuplicateFinder::new().find_duplicates("/data")?;
//! for group in &report.groups {
//!     println!("{} files share {}", group.count(), group.digest);
//! }
//! ```
//!
//! # Age partitioning
//!
//! ```rust,ignore
//! use dirsift_analyze::age::{AgeConfig, partition_by_age};
//!
//! let partition = partition_by_age(entries, &AgeConfig::days(30));
//! println!("{} files older than 30 days", partition.old.len());
//! ```

pub mod age;
mod duplicates;
mod hasher;

pub use age::{AgeConfig, AgePartition, partition_by_age};
pub use duplicates::{DuplicateConfig, DuplicateFinder, DuplicateGroup, DuplicateReport};
pub use hasher::digest_file;

// Re-export core types
pub use dirsift_core::{Digest, WalkError};
