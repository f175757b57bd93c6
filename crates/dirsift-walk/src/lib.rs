//! Directory tree walker for dirsift.
//!
//! The walker enumerates regular files under a root subject to a
//! [`WalkConfig`](dirsift_core::WalkConfig): a file-name glob, a
//! recursion toggle, a hidden-file flag, and an optional depth limit.
//! It is a lazy iterator driven by an explicit work stack, so callers
//! can stop consuming at any point and arbitrarily deep trees never
//! exhaust the call stack.
//!
//! Per-entry failures (an unreadable subdirectory, a vanished entry)
//! are logged through `tracing` and skipped; they never abort the walk.
//!
//! ```rust,ignore
//! use dirsift_core::WalkConfig;
//! use dirsift_walk::find_files;
//!
//! let config = WalkConfig::matching("*.txt");
//! for path in find_files("/var/log", &config)? {
//!     println!("{}", path.display());
//! }
//! ```

mod hidden;
mod walker;

pub use hidden::is_hidden;
pub use walker::{Walker, find_files};
