//! Expansion of user-supplied paths into the flat list of files to fingerprint.
//!
//! Files are taken as given (made absolute), directories are walked
//! recursively. Inputs that do not exist are reported and skipped rather than
//! failing the whole batch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("Cannot resolve absolute path for {path}: {source}")]
    Absolute {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Collected {
    /// Absolute paths of regular files, in discovery order, without duplicates.
    pub files: Vec<PathBuf>,
    /// Inputs that could not be found or accessed.
    pub missing: Vec<PathBuf>,
}

/// Make `path` absolute relative to the current directory.
///
/// Symlinks and `..` components are left as they are, so the result names the
/// file the way the user did.
pub fn absolute_path(path: &Path) -> Result<PathBuf, CollectError> {
    std::path::absolute(path).map_err(|source| CollectError::Absolute {
        path: path.to_path_buf(),
        source,
    })
}

/// Expand `inputs` into absolute regular file paths.
///
/// Directories are walked with no depth limit. Symlinks are followed, but a
/// link that leads back into one of its own ancestors is reported and not
/// descended into again. Entries that cannot be read while walking are
/// reported and skipped.
pub fn collect_files(inputs: &[PathBuf]) -> Result<Collected, CollectError> {
    let mut collected = Collected::default();
    let mut seen = HashSet::new();

    for input in inputs {
        let metadata = match std::fs::metadata(input) {
            Ok(metadata) => metadata,
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    warn!("{} not found", input.display());
                } else {
                    warn!("Cannot access {}: {}", input.display(), e);
                }
                collected.missing.push(input.clone());
                continue;
            }
        };

        let absolute = absolute_path(input)?;

        if metadata.is_file() {
            push_unique(&mut collected.files, &mut seen, absolute);
        } else if metadata.is_dir() {
            walk_directory(&absolute, &mut collected.files, &mut seen);
        } else {
            warn!("{} is not a regular file or directory", input.display());
        }
    }

    Ok(collected)
}

fn walk_directory(root: &Path, files: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>) {
    debug!("Walking {}", root.display());

    let walker = WalkDir::new(root).follow_links(true).sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                push_unique(files, seen, entry.into_path());
            }
            Ok(_) => {}
            Err(e) => {
                if let Some(ancestor) = e.loop_ancestor() {
                    warn!(
                        "Skipping symlink loop at {} (points back to {})",
                        e.path().map(|p| p.display().to_string()).unwrap_or_default(),
                        ancestor.display()
                    );
                } else {
                    warn!("Skipping unreadable entry: {}", e);
                }
            }
        }
    }
}

fn push_unique(files: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>, path: PathBuf) {
    if seen.insert(path.clone()) {
        files.push(path);
    }
}
