//! Hidden-path classification.

use std::path::Path;

/// Check whether a path is hidden by platform convention.
///
/// On Unix a path is hidden when its file name starts with a dot. On
/// Windows the hidden attribute from the path's metadata is used; a
/// metadata error maps to `false` so a hidden check can never abort a
/// traversal.
pub fn is_hidden(path: &Path) -> bool {
    #[cfg(windows)]
    {
        if windows_hidden_attribute(path) {
            return true;
        }
    }

    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

#[cfg(windows)]
fn windows_hidden_attribute(path: &Path) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    std::fs::symlink_metadata(path)
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}
