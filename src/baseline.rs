//! The persistent baseline: recorded fingerprints keyed by absolute path.
//!
//! The backing file is a single JSON object mapping each monitored path to its
//! record. It is always rewritten as a whole, through a temporary file that is
//! renamed into place, so an interrupted save never leaves a truncated store.

use crate::checksum::FileChecksum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

pub const DEFAULT_BASELINE_FILENAME: &str = "integrity_db.json";

#[derive(Debug, thiserror::Error)]
pub enum BaselineError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BaselineError {
    fn from_io(path: &Path, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            BaselineError::PermissionDenied(path.to_path_buf())
        } else {
            BaselineError::Io(e)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineRecord {
    /// Hex encoded SHA-256 of the contents. Stores written by older tools hold
    /// `null` here for a file that could not be read when it was re-baselined.
    pub hash: Option<String>,
    pub size: u64,
    /// Modification time in (fractional) seconds since the Unix epoch.
    pub modified: f64,
    /// Local time the record was first created, ISO-8601 without offset.
    pub added_date: String,
}

impl BaselineRecord {
    pub fn new(checksum: &FileChecksum, added_date: String) -> Self {
        BaselineRecord {
            hash: Some(checksum.sha256.clone()),
            size: checksum.size,
            modified: system_time_secs(checksum.mtime),
            added_date,
        }
    }

    /// Re-baseline from a fresh checksum. `added_date` is left alone.
    pub fn refresh(&mut self, checksum: &FileChecksum) {
        self.hash = Some(checksum.sha256.clone());
        self.size = checksum.size;
        self.modified = system_time_secs(checksum.mtime);
    }
}

pub fn system_time_secs(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        Err(e) => -e.duration().as_secs_f64(),
    }
}

/// Current local time in the format stored in `added_date`.
pub fn now_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    path: PathBuf,
    records: BTreeMap<String, BaselineRecord>,
}

impl Baseline {
    /// An empty baseline that will be saved to `path`.
    pub fn new(path: &Path) -> Self {
        Baseline {
            path: path.to_path_buf(),
            records: BTreeMap::new(),
        }
    }

    /// Load the baseline stored at `path`.
    ///
    /// A missing file yields an empty baseline. So does a file that cannot be
    /// read or parsed, after a warning: whatever it held is lost for this run,
    /// and the next mutating command overwrites it.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(baseline) => baseline,
            Err(e) => {
                warn!(
                    "Corrupt baseline file {} ({}). Starting fresh.",
                    path.display(),
                    e
                );
                Self::new(path)
            }
        }
    }

    /// Like [`Baseline::load`], but reports unreadable or malformed content
    /// instead of discarding it.
    pub fn try_load(path: &Path) -> Result<Self, BaselineError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No baseline at {}, starting empty", path.display());
                return Ok(Self::new(path));
            }
            Err(e) => return Err(BaselineError::from_io(path, e)),
        };

        let records = Self::from_json(&content)?;
        debug!(
            "Loaded {} record(s) from {}",
            records.len(),
            path.display()
        );

        Ok(Baseline {
            path: path.to_path_buf(),
            records,
        })
    }

    pub fn from_json(content: &str) -> Result<BTreeMap<String, BaselineRecord>, BaselineError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String, BaselineError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Save the baseline atomically.
    ///
    /// Writes to a temporary file next to the target, fsyncs it, then renames
    /// it into place.
    pub fn save(&self) -> Result<(), BaselineError> {
        use std::io::Write;

        let mut content = self.to_json()?;
        content.push('\n');

        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| BaselineError::from_io(parent, e))?;

        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| BaselineError::from_io(&self.path, e))?;

        temp_file.as_file().sync_all().map_err(BaselineError::Io)?;

        temp_file
            .persist(&self.path)
            .map_err(|e| BaselineError::from_io(&self.path, e.error))?;

        debug!(
            "Saved {} record(s) to {}",
            self.records.len(),
            self.path.display()
        );

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert or replace the record for `key`.
    pub fn upsert(&mut self, key: String, record: BaselineRecord) {
        self.records.insert(key, record);
    }

    pub fn remove(&mut self, key: &str) -> Option<BaselineRecord> {
        self.records.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&BaselineRecord> {
        self.records.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut BaselineRecord> {
        self.records.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Records in path order, which is also the order they are stored in.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BaselineRecord)> {
        self.records.iter()
    }

    pub fn keys(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
