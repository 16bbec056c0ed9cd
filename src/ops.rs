//! Mutating operations on the baseline: add, remove and update.
//!
//! None of these save the baseline; the caller persists it once the whole
//! batch has been applied.

use crate::baseline::{Baseline, BaselineRecord, now_timestamp};
use crate::checksum::checksum_file;
use crate::collect::{CollectError, absolute_path, collect_files};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum OpsError {
    #[error("Collect error: {0}")]
    Collect(#[from] CollectError),
}

/// Key under which `path` is stored. Baseline keys are strings, so paths
/// that are not valid UTF-8 cannot be monitored.
fn baseline_key(path: &Path) -> Option<&str> {
    let key = path.to_str();
    if key.is_none() {
        warn!("Skipping {}: path is not valid UTF-8", path.display());
    }
    key
}

#[derive(Debug, Default)]
pub struct AddResult {
    /// Keys of the records written, in the order they were added.
    pub added: Vec<String>,
    /// Files that were found but could not be checksummed.
    pub failed: Vec<PathBuf>,
    /// Inputs that did not exist.
    pub missing: Vec<PathBuf>,
}

/// Fingerprint every file named by `inputs` (directories are expanded) and
/// record it, replacing any existing record for the same path.
pub fn add_paths(baseline: &mut Baseline, inputs: &[PathBuf]) -> Result<AddResult, OpsError> {
    let collected = collect_files(inputs)?;

    let mut result = AddResult {
        missing: collected.missing,
        ..Default::default()
    };

    for path in collected.files {
        let Some(key) = baseline_key(&path).map(str::to_string) else {
            result.failed.push(path);
            continue;
        };

        match checksum_file(&path) {
            Ok(checksum) => {
                baseline.upsert(key.clone(), BaselineRecord::new(&checksum, now_timestamp()));
                result.added.push(key);
            }
            Err(e) => {
                warn!("Error reading {}: {}", path.display(), e);
                result.failed.push(path);
            }
        }
    }

    Ok(result)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(PathBuf),
    NotMonitored(PathBuf),
}

#[derive(Debug, Default)]
pub struct RemoveResult {
    /// One outcome per input, in input order. Paths are as the user gave them.
    pub outcomes: Vec<RemoveOutcome>,
}

impl RemoveResult {
    pub fn removed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RemoveOutcome::Removed(_)))
            .count()
    }
}

/// Stop monitoring each of `inputs`. Inputs are matched by absolute path and
/// do not need to exist any more.
pub fn remove_paths(
    baseline: &mut Baseline,
    inputs: &[PathBuf],
) -> Result<RemoveResult, OpsError> {
    let mut result = RemoveResult::default();

    for input in inputs {
        let absolute = absolute_path(input)?;
        let removed = absolute
            .to_str()
            .is_some_and(|key| baseline.remove(key).is_some());

        result.outcomes.push(if removed {
            RemoveOutcome::Removed(input.clone())
        } else {
            RemoveOutcome::NotMonitored(input.clone())
        });
    }

    Ok(result)
}

#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Paths whose records were refreshed, as the user gave them when
    /// explicit paths were passed, otherwise as stored.
    pub updated: Vec<PathBuf>,
    /// Monitored files that exist but could not be checksummed. Their
    /// previous records are kept.
    pub failed: Vec<PathBuf>,
}

/// Re-baseline monitored files from their current contents.
///
/// With `Some(inputs)` only those paths are considered, otherwise every
/// monitored path. Paths that are not monitored, or no longer exist, are
/// skipped; reporting deletions is the job of `check`. The hash, size and
/// modification time are refreshed while the original `added_date` is kept.
pub fn update_paths(
    baseline: &mut Baseline,
    inputs: Option<&[PathBuf]>,
) -> Result<UpdateResult, OpsError> {
    let targets: Vec<(PathBuf, String)> = match inputs {
        Some(inputs) => {
            let mut targets = Vec::new();
            for input in inputs {
                let absolute = absolute_path(input)?;
                let Some(key) = baseline_key(&absolute) else {
                    continue;
                };
                if !baseline.contains(key) {
                    info!("{} is not monitored, skipping", input.display());
                    continue;
                }
                targets.push((input.clone(), key.to_string()));
            }
            targets
        }
        None => baseline
            .keys()
            .into_iter()
            .map(|key| (PathBuf::from(&key), key))
            .collect(),
    };

    let mut result = UpdateResult::default();

    for (display_path, key) in targets {
        let path = Path::new(&key);
        if !path.exists() {
            info!("{} no longer exists, skipping", path.display());
            continue;
        }

        match checksum_file(path) {
            Ok(checksum) => {
                if let Some(record) = baseline.get_mut(&key) {
                    record.refresh(&checksum);
                    result.updated.push(display_path);
                }
            }
            Err(e) => {
                warn!("Error reading {}: {}", path.display(), e);
                result.failed.push(display_path);
            }
        }
    }

    Ok(result)
}
