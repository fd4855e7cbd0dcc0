//! The whole-module exception override.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::license::{License, LicenseMetadata};
use super::read_license_file;
use crate::config::Config;
use crate::discovery::{collect_license_files, Which};
use crate::tree::{dir_of, FileTree};

/// Returns the declared licenses of `module_path` if the module still
/// carries exactly the files its exception entry describes, and `None`
/// otherwise.
pub(super) fn override_licenses(
    tree: &dyn FileTree,
    module_path: &str,
    config: &Config,
) -> Option<Vec<License>> {
    let declared = config.exceptions().get(module_path)?;
    if declared.is_empty() {
        return None;
    }

    let mut licenses = Vec::with_capacity(declared.len());
    for file in declared {
        let contents = match read_license_file(tree, &file.path, config.max_file_size()) {
            Ok(contents) => contents,
            Err(err) => {
                debug!(module = module_path, path = %file.path, error = %err, "declared exception file unavailable");
                return None;
            }
        };
        if !file.matches(&contents) {
            debug!(module = module_path, path = %file.path, "declared exception file has changed");
            return None;
        }

        let coverage = config.classifier().classify(&contents, &file.path).coverage;
        licenses.push(License {
            metadata: LicenseMetadata {
                types: file.types.iter().cloned().collect(),
                file_path: file.path.clone(),
                coverage,
            },
            contents: Some(contents),
        });
    }

    let present = match collect_license_files(tree, module_path, Which::All, config.ignore_list()) {
        Ok(present) => present,
        Err(err) => {
            warn!(module = module_path, error = %err, "failed to list license files");
            return None;
        }
    };
    let declared_paths: HashSet<&str> = declared.iter().map(|f| f.path.as_str()).collect();
    if let Some(extra) = present
        .iter()
        .find(|path| !declared_paths.contains(path.as_str()) && !in_testdata(path))
    {
        debug!(module = module_path, path = %extra, "undeclared license file present");
        return None;
    }

    Some(licenses)
}

fn in_testdata(path: &str) -> bool {
    dir_of(path).split('/').any(|segment| segment == "testdata")
}
