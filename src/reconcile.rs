use crate::baseline::Baseline;
use crate::checksum::checksum_file;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Current contents hash to the recorded value.
    Intact,
    /// Current contents differ from the record, or the record holds no hash.
    Modified {
        stored_sha256: Option<String>,
        current_sha256: String,
    },
    /// The path no longer exists.
    Deleted,
    /// The path exists but could not be checksummed, so nothing can be said
    /// about its contents.
    Unreadable { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckEntry {
    pub path: String,
    pub status: CheckStatus,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckCounts {
    pub intact: usize,
    pub modified: usize,
    pub deleted: usize,
    pub unreadable: usize,
}

impl CheckCounts {
    /// True when no file is modified, deleted or unreadable.
    pub fn all_intact(&self) -> bool {
        self.modified == 0 && self.deleted == 0 && self.unreadable == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// One entry per monitored file, in baseline order.
    pub entries: Vec<CheckEntry>,
}

impl CheckReport {
    pub fn counts(&self) -> CheckCounts {
        let mut counts = CheckCounts::default();
        for entry in &self.entries {
            match entry.status {
                CheckStatus::Intact => counts.intact += 1,
                CheckStatus::Modified { .. } => counts.modified += 1,
                CheckStatus::Deleted => counts.deleted += 1,
                CheckStatus::Unreadable { .. } => counts.unreadable += 1,
            }
        }
        counts
    }
}

/// Compare every monitored file against its recorded checksum.
///
/// Every file is re-read in full; size and modification time are not used as
/// a shortcut, since either can be forged. The baseline is not modified.
pub fn check_baseline(baseline: &Baseline) -> CheckReport {
    let entries = baseline
        .iter()
        .map(|(path, record)| CheckEntry {
            path: path.clone(),
            status: classify(Path::new(path), record.hash.as_deref()),
        })
        .collect();

    CheckReport { entries }
}

fn classify(path: &Path, stored_sha256: Option<&str>) -> CheckStatus {
    match path.try_exists() {
        Ok(false) => return CheckStatus::Deleted,
        Ok(true) => {}
        Err(e) => {
            return CheckStatus::Unreadable {
                error: e.to_string(),
            };
        }
    }

    match checksum_file(path) {
        Ok(checksum) if stored_sha256 == Some(checksum.sha256.as_str()) => CheckStatus::Intact,
        Ok(checksum) => {
            debug!(
                "{} changed: {} -> {}",
                path.display(),
                stored_sha256.unwrap_or("(none)"),
                checksum.sha256
            );
            CheckStatus::Modified {
                stored_sha256: stored_sha256.map(str::to_string),
                current_sha256: checksum.sha256,
            }
        }
        Err(e) => CheckStatus::Unreadable {
            error: e.to_string(),
        },
    }
}
