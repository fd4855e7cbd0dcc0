//! Finding candidate license files in a module.

pub mod filter;
pub mod names;
pub mod path_check;

pub use filter::{is_vendored, IgnoreList, Which};
pub use names::{is_license_file_name, LICENSE_FILE_NAMES};
pub use path_check::{check_file_path, PathCheckError};

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::error::IoError;
use crate::tree::{base_name, FileTree};

/// Lists the license files of `module_path` that fall in `which`, in sorted
/// order.
pub fn collect_license_files(
    tree: &dyn FileTree,
    module_path: &str,
    which: Which,
    ignore: &IgnoreList,
) -> Result<Vec<String>, IoError> {
    let files = tree.walk_files()?;

    let mut folded_paths = HashSet::new();
    let mut candidates = Vec::new();

    for path in files {
        let collides = !folded_paths.insert(path.to_lowercase());

        if !is_license_file_name(base_name(&path)) {
            continue;
        }
        if ignore.is_ignored(module_path, &path) {
            trace!(module = module_path, path = %path, "ignoring known false positive");
            continue;
        }
        if !which.accepts(&path) {
            continue;
        }
        if is_vendored(&path) {
            trace!(module = module_path, path = %path, "skipping vendored license file");
            continue;
        }
        if let Err(err) = check_file_path(&path) {
            warn!(module = module_path, path = %path, error = %err, "skipping unsafe license file path");
            continue;
        }
        if collides {
            warn!(module = module_path, path = %path, "skipping license file that collides ignoring case");
            continue;
        }
        candidates.push(path);
    }

    debug!(module = module_path, ?which, count = candidates.len(), "collected license files");
    Ok(candidates)
}
