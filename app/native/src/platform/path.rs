//! Shell-like path expansion for configured directories.

use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory. Blank input yields an empty
/// path; everything else is returned unchanged.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();
    if path.is_empty() {
        return PathBuf::new();
    }

    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Expands `~`, then resolves a relative result against `base_dir`.
///
/// Used for the storage directory, which is relative to the config file
/// that names it.
#[must_use]
pub fn expand_and_resolve(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand(path);
    if expanded.as_os_str().is_empty() || expanded.is_absolute() {
        return expanded;
    }

    base_dir.join(expanded)
}
