//! SHA-256 fingerprints of file contents.

use sha2::{Digest, Sha256};
use std::fs::{File, Metadata};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

/// Files are streamed through the hasher in chunks of this size, so memory use
/// stays bounded no matter how large the file is.
const CHUNK_SIZE: usize = 4096;

#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("File modified during checksumming: {0}")]
    ConcurrentModification(PathBuf),
}

impl ChecksumError {
    fn from_io(path: &Path, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ChecksumError::PermissionDenied(path.to_path_buf())
        } else {
            ChecksumError::Io(e)
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileChecksum {
    /// Lowercase hex.
    pub sha256: String,
    /// Modification time observed once the contents were read.
    pub mtime: SystemTime,
    pub size: u64,
}

/// Fingerprint the file at `path`.
///
/// The modification time is sampled before and after the contents are read.
/// If the two differ the file was written to mid-read and the digest would
/// describe neither version, so `ConcurrentModification` is returned instead.
/// Writes that leave the mtime untouched go unnoticed.
pub fn checksum_file(path: &Path) -> Result<FileChecksum, ChecksumError> {
    info!("Checksumming {}", path.display());

    let mtime_before = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| ChecksumError::from_io(path, e))?;

    let mut file = File::open(path).map_err(|e| ChecksumError::from_io(path, e))?;
    let sha256 = sha256_hex(&mut file).map_err(ChecksumError::Io)?;

    let metadata = unchanged_since(path, mtime_before)?;
    debug!("Checksum of {} is {}", path.display(), sha256);

    Ok(FileChecksum {
        sha256,
        mtime: metadata.modified().map_err(ChecksumError::Io)?,
        size: metadata.len(),
    })
}

fn sha256_hex(reader: &mut impl Read) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Current metadata of `path`, provided its mtime still equals `mtime_before`.
fn unchanged_since(path: &Path, mtime_before: SystemTime) -> Result<Metadata, ChecksumError> {
    let metadata = std::fs::metadata(path).map_err(ChecksumError::Io)?;
    if metadata.modified().map_err(ChecksumError::Io)? != mtime_before {
        return Err(ChecksumError::ConcurrentModification(path.to_path_buf()));
    }
    Ok(metadata)
}
