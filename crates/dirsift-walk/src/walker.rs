//! Work-stack driven file enumeration.

use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use tracing::{debug, warn};

use dirsift_core::{WalkConfig, WalkError};

use crate::hidden::is_hidden;

/// Lazy file enumerator.
///
/// Yields the paths of regular files whose names match the configured
/// glob. Directories are expanded one listing at a time off an explicit
/// stack of pending directories, so no recursion depth is involved and
/// a caller that stops consuming stops the walk.
///
/// Depth semantics: files directly inside the root are at depth 0, and
/// each directory descent adds 1. With `max_depth = Some(d)` files at
/// depth `d` are still yielded; descending past them is not.
pub struct Walker {
    matcher: GlobMatcher,
    recursive: bool,
    include_hidden: bool,
    max_depth: Option<u32>,
    /// Directories not yet listed, with the depth of their contents.
    pending: Vec<(PathBuf, u32)>,
    current: Option<(ReadDir, u32)>,
}

impl Walker {
    /// Create a walker over `root`.
    ///
    /// Fails only when the configured pattern is not a valid glob. A
    /// missing root, or a root that is not a directory, produces an
    /// empty walk rather than an error.
    pub fn new(root: impl AsRef<Path>, config: &WalkConfig) -> Result<Self, WalkError> {
        let matcher = Glob::new(&config.pattern)
            .map_err(|e| WalkError::InvalidPattern {
                pattern: config.pattern.clone(),
                message: e.to_string(),
            })?
            .compile_matcher();

        let root = root.as_ref();
        let pending = if root.is_dir() {
            vec![(root.to_path_buf(), 0)]
        } else {
            debug!(root = %root.display(), "walk root is missing or not a directory");
            Vec::new()
        };

        Ok(Self {
            matcher,
            recursive: config.recursive,
            include_hidden: config.include_hidden,
            max_depth: config.max_depth,
            pending,
            current: None,
        })
    }

    /// Whether to descend past a directory whose contents sit at `depth`.
    fn should_descend(&self, depth: u32) -> bool {
        self.recursive && self.max_depth.is_none_or(|limit| limit > depth)
    }
}

impl Iterator for Walker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            if let Some((mut entries, depth)) = self.current.take() {
                while let Some(result) = entries.next() {
                    let entry = match result {
                        Ok(entry) => entry,
                        Err(err) => {
                            warn!(error = %err, "skipping unreadable directory entry");
                            continue;
                        }
                    };

                    let path = entry.path();
                    let file_type = match entry.file_type() {
                        Ok(file_type) => file_type,
                        Err(err) => {
                            warn!(path = %path.display(), error = %err, "skipping entry with unreadable type");
                            continue;
                        }
                    };

                    if !self.include_hidden && is_hidden(&path) {
                        continue;
                    }

                    if file_type.is_dir() {
                        if self.should_descend(depth) {
                            self.pending.push((path, depth + 1));
                        }
                    } else if file_type.is_file() && self.matcher.is_match(entry.file_name()) {
                        self.current = Some((entries, depth));
                        return Some(path);
                    }
                    // Symlinks and other node kinds are neither yielded
                    // nor followed, which also rules out symlink cycles.
                }
            }

            let (dir, depth) = self.pending.pop()?;
            match fs::read_dir(&dir) {
                Ok(entries) => self.current = Some((entries, depth)),
                Err(err) => {
                    warn!(path = %dir.display(), error = %err, "skipping unreadable directory");
                }
            }
        }
    }
}

/// Walk `root` and collect every matching file path.
pub fn find_files(root: impl AsRef<Path>, config: &WalkConfig) -> Result<Vec<PathBuf>, WalkError> {
    Ok(Walker::new(root, config)?.collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("sub")).unwrap();
        fs::create_dir(root.join("sub/deeper")).unwrap();
        fs::create_dir(root.join(".hidden_dir")).unwrap();

        fs::write(root.join("top.txt"), "top").unwrap();
        fs::write(root.join("top.log"), "log").unwrap();
        fs::write(root.join(".hidden.txt"), "hidden").unwrap();
        fs::write(root.join("sub/mid.txt"), "mid").unwrap();
        fs::write(root.join("sub/deeper/deep.txt"), "deep").unwrap();
        fs::write(root.join(".hidden_dir/buried.txt"), "buried").unwrap();

        temp
    }

    fn names(paths: &[PathBuf]) -> HashSet<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_recursive_walk_finds_all_visible_files() {
        let temp = create_test_tree();
        let found = find_files(temp.path(), &WalkConfig::match_all()).unwrap();

        let expected: HashSet<String> = ["top.txt", "top.log", "mid.txt", "deep.txt"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names(&found), expected);
    }

    #[test]
    fn test_non_recursive_walk_is_depth_zero_only() {
        let temp = create_test_tree();
        let config = WalkConfig::builder()
            .recursive(false)
            // max_depth is irrelevant when recursion is off.
            .max_depth(Some(10))
            .build()
            .unwrap();

        let found = find_files(temp.path(), &config).unwrap();
        let expected: HashSet<String> =
            ["top.txt", "top.log"].iter().map(|s| s.to_string()).collect();
        assert_eq!(names(&found), expected);
    }

    #[test]
    fn test_max_depth_bounds_every_reported_file() {
        let temp = create_test_tree();

        for limit in 0..3u32 {
            let config = WalkConfig::builder()
                .max_depth(Some(limit))
                .build()
                .unwrap();
            let found = find_files(temp.path(), &config).unwrap();

            let root_components = temp.path().components().count();
            for path in &found {
                // depth = directory descents below the root
                let depth = path.components().count() - root_components - 1;
                assert!(
                    depth as u32 <= limit,
                    "{} exceeds depth {limit}",
                    path.display()
                );
            }
        }
    }

    #[test]
    fn test_max_depth_boundary_files_included() {
        let temp = create_test_tree();
        let config = WalkConfig::builder().max_depth(Some(1)).build().unwrap();

        let found = names(&find_files(temp.path(), &config).unwrap());
        assert!(found.contains("mid.txt"));
        assert!(!found.contains("deep.txt"));
    }

    #[test]
    fn test_hidden_directory_is_pruned_entirely() {
        let temp = create_test_tree();

        let without = find_files(temp.path(), &WalkConfig::match_all()).unwrap();
        assert!(!names(&without).contains("buried.txt"));
        assert!(!names(&without).contains(".hidden.txt"));

        let config = WalkConfig::builder().include_hidden(true).build().unwrap();
        let with = names(&find_files(temp.path(), &config).unwrap());
        assert!(with.contains("buried.txt"));
        assert!(with.contains(".hidden.txt"));
    }

    #[test]
    fn test_pattern_matches_file_names_only() {
        let temp = create_test_tree();
        let found = find_files(temp.path(), &WalkConfig::matching("*.log")).unwrap();
        let expected: HashSet<String> = ["top.log".to_string()].into_iter().collect();
        assert_eq!(names(&found), expected);
    }

    #[test]
    fn test_pattern_with_recursion_off() {
        let temp = create_test_tree();
        let config = WalkConfig::builder()
            .pattern("*.txt")
            .recursive(false)
            .build()
            .unwrap();

        let found = find_files(temp.path(), &config).unwrap();
        assert_eq!(found, vec![temp.path().join("top.txt")]);
    }

    #[test]
    fn test_missing_root_yields_empty_result() {
        let found = find_files("/no/such/directory", &WalkConfig::match_all()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_file_root_yields_empty_result() {
        let temp = create_test_tree();
        let found = find_files(temp.path().join("top.txt"), &WalkConfig::match_all()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let result = find_files("/tmp", &WalkConfig::matching("a["));
        assert!(matches!(result, Err(WalkError::InvalidPattern { .. })));
    }

    #[test]
    fn test_walker_is_lazy() {
        let temp = create_test_tree();
        let mut walker = Walker::new(temp.path(), &WalkConfig::match_all()).unwrap();

        // Taking one item must not require draining the tree.
        assert!(walker.next().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_not_followed() {
        let temp = create_test_tree();
        std::os::unix::fs::symlink(temp.path().join("sub"), temp.path().join("loop")).unwrap();

        let found = find_files(temp.path(), &WalkConfig::match_all()).unwrap();
        // mid.txt is reachable only once, through the real directory.
        let mids = found
            .iter()
            .filter(|p| p.file_name().unwrap() == "mid.txt")
            .count();
        assert_eq!(mids, 1);
    }
}
