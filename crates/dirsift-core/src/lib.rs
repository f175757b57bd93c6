//! Core types for dirsift.
//!
//! This crate provides the value types shared across the dirsift
//! workspace: the traversal configuration, content digests, error
//! types, and the caller-owned TTL cache.

pub mod cache;
mod config;
mod digest;
mod error;

pub use cache::TtlCache;
pub use config::{WalkConfig, WalkConfigBuilder};
pub use digest::Digest;
pub use error::WalkError;
