//! Lowercasing output file names

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Rename every file in `dir` to its all-lowercase name.
///
/// A mixed-case file replaces an already-lowercase file of the same name, which
/// is the previous run's output. Two mixed-case files that lowercase to the
/// same name are a [`Error::RenameConflict`]; nothing is renamed in that case.
///
/// Returns the final paths of all files, sorted.
pub fn lowercase_file_names(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        groups.entry(name.to_lowercase()).or_default().push(name);
    }

    for (target, names) in &groups {
        let renamed: Vec<&String> = names.iter().filter(|n| *n != target).collect();
        if renamed.len() > 1 {
            let mut sources: Vec<PathBuf> = renamed.iter().map(|n| dir.join(n)).collect();
            sources.sort();
            return Err(Error::RenameConflict {
                sources,
                target: dir.join(target),
            });
        }
    }

    let mut outputs = Vec::with_capacity(groups.len());
    for (target, names) in groups {
        let target_path = dir.join(&target);
        if let Some(source) = names.iter().find(|n| **n != target) {
            if names.len() > 1 {
                tracing::warn!(
                    path = %target_path.display(),
                    "replacing output from an earlier run"
                );
            }
            std::fs::rename(dir.join(source), &target_path)?;
        }
        outputs.push(target_path);
    }

    Ok(outputs)
}
