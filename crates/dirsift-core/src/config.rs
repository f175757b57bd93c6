//! Traversal configuration.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for a directory traversal.
///
/// Passed by value (or shared reference) into the walker and never
/// mutated mid-traversal.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Glob pattern matched against file names (not full paths).
    #[builder(default = "String::from(\"*\")")]
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Descend into subdirectories. When false only the root
    /// directory's immediate contents are considered and `max_depth`
    /// is irrelevant.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Include hidden files and directories. When false a hidden
    /// directory's contents are never visited.
    #[builder(default = "false")]
    #[serde(default)]
    pub include_hidden: bool,

    /// Maximum traversal depth (None = unlimited). Files directly in
    /// the root are at depth 0; the walker descends into a directory
    /// at depth `d` only while `max_depth > d`.
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,
}

fn default_pattern() -> String {
    "*".to_string()
}

fn default_true() -> bool {
    true
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref pattern) = self.pattern {
            if pattern.is_empty() {
                return Err("Pattern cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl WalkConfig {
    /// Create a new config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Config matching every file, recursive, hidden excluded.
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Config matching a single pattern, recursive, hidden excluded.
    pub fn matching(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            recursive: true,
            include_hidden: false,
            max_depth: None,
        }
    }
}
