//! Draft storage errors.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use crate::entities::CoverType;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Managed directory missing and could not be (re)created
    #[error("draft directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("corrupted draft data in {path}: {reason}")]
    CorruptedData { path: PathBuf, reason: String },

    #[error("{path} was written by a newer version (sidecar version {version})")]
    UnsupportedVersion { path: PathBuf, version: u64 },

    #[error("draft has no {0} cover slot")]
    CoverSlotMissing(CoverType),

    #[error("cannot move clip {from} to {to}: only interior positions 1..{len_minus_one} are movable", len_minus_one = .len.saturating_sub(1))]
    InvalidMove { from: usize, to: usize, len: usize },

    #[error("no clip at index {index} (draft has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Durations must be finite and non-negative; JSON can't carry NaN/inf
    #[error("clip {id} has invalid duration {duration}")]
    InvalidDuration { id: Uuid, duration: f64 },

    /// Media names are a single path component inside the draft directory
    #[error("invalid media file name {0:?}")]
    InvalidFileName(String),

    #[error("clip {0} is not part of the draft")]
    ClipNotFound(Uuid),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupted(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        StorageError::CorruptedData {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = StorageError::CoverSlotMissing(CoverType::Outro);
        assert_eq!(e.to_string(), "draft has no outro cover slot");

        let e = StorageError::InvalidMove { from: 0, to: 2, len: 4 };
        assert_eq!(
            e.to_string(),
            "cannot move clip 0 to 2: only interior positions 1..3 are movable"
        );

        let e = StorageError::InvalidFileName("../x".into());
        assert_eq!(e.to_string(), "invalid media file name \"../x\"");
    }

    #[test]
    fn test_io_keeps_source() {
        use std::error::Error as _;
        let e = StorageError::io("/x", std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(e.source().is_some());
    }
}
