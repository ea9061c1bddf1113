//! Path resolution utilities
//!
//! Cache directories are always addressed by absolute path; these helpers
//! turn caller-supplied names into absolute targets.

use std::io;
use std::path::{Path, PathBuf};

/// Resolve a cache directory name to an absolute target path.
///
/// With a parent the target is `parent/dir`; without one, relative names are
/// anchored at the current working directory and absolute names are used
/// as-is.
pub fn resolve_target(dir: &Path, parent: Option<&Path>) -> io::Result<PathBuf> {
    if let Some(parent) = parent {
        return Ok(parent.join(dir));
    }
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(dir))
}

/// Final path segment, or empty string when the path has none (e.g. `/`).
pub fn dir_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
}

/// Normalize a path to use '/' as separator (for stable log/display output)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
