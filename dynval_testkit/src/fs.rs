//! Filesystem existence checks

use std::fs;
use std::path::Path;

/// Longest path, in bytes, that the checks will stat
const MAX_PATH_LEN: usize = 468;

fn stat_dir(path: &Path) -> Option<bool> {
    let len = path.as_os_str().len();
    if len == 0 || len > MAX_PATH_LEN {
        return None;
    }
    fs::metadata(path).ok().map(|meta| meta.is_dir())
}

/// Check if the path exists and is a directory
pub fn is_dir(path: impl AsRef<Path>) -> bool {
    stat_dir(path.as_ref()) == Some(true)
}

/// Check if the path exists and is not a directory
pub fn is_file(path: impl AsRef<Path>) -> bool {
    stat_dir(path.as_ref()) == Some(false)
}
