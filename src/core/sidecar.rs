//! Sidecar file codec.
//!
//! Current layout:
//! ```json
//! { "version": 1, "clips": [ {"cover": {...}}, {"video": {...}}, {"cover": {...}} ] }
//! ```
//!
//! Older files are recognized by shape:
//! - bare array of `CompositionClip` (pre-versioning)
//! - bare array of `VideoDraft` (inlined video bytes)
//!
//! Both come back tagged so the storage layer can migrate them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{Result, StorageError};
use crate::config::SIDECAR_VERSION;
use crate::entities::{CompositionClip, VideoDraft};

#[derive(Serialize)]
struct SidecarOut<'a> {
    version: u32,
    clips: &'a [CompositionClip],
}

#[derive(Deserialize)]
struct SidecarIn {
    clips: Vec<CompositionClip>,
}

/// Decoded sidecar, tagged by the layout it was read from.
#[derive(Debug, PartialEq)]
pub enum SidecarContents {
    Current(Vec<CompositionClip>),
    Unversioned(Vec<CompositionClip>),
    Legacy(Vec<VideoDraft>),
}

impl SidecarContents {
    pub fn needs_migration(&self) -> bool {
        !matches!(self, SidecarContents::Current(_))
    }
}

/// Serialize clips in the current layout (pretty JSON, trailing newline).
pub fn encode(clips: &[CompositionClip]) -> serde_json::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(&SidecarOut {
        version: SIDECAR_VERSION,
        clips,
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode sidecar bytes. `path` is only used for error reporting.
pub fn decode(bytes: &[u8], path: &Path) -> Result<SidecarContents> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| StorageError::corrupted(path, e))?;

    match value {
        Value::Object(ref map) => {
            let version = map
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| StorageError::corrupted(path, "missing sidecar version"))?;

            if version > u64::from(SIDECAR_VERSION) {
                return Err(StorageError::UnsupportedVersion {
                    path: path.to_path_buf(),
                    version,
                });
            }
            if version != u64::from(SIDECAR_VERSION) {
                return Err(StorageError::corrupted(
                    path,
                    format!("invalid sidecar version {}", version),
                ));
            }

            let file: SidecarIn =
                serde_json::from_value(value).map_err(|e| StorageError::corrupted(path, e))?;
            Ok(SidecarContents::Current(file.clips))
        }
        Value::Array(_) => {
            let clip_err = match serde_json::from_value::<Vec<CompositionClip>>(value.clone()) {
                Ok(clips) => return Ok(SidecarContents::Unversioned(clips)),
                Err(e) => e,
            };
            match serde_json::from_value::<Vec<VideoDraft>>(value) {
                Ok(drafts) => Ok(SidecarContents::Legacy(drafts)),
                // Report the clip error: that's the layout we expected
                Err(_) => Err(StorageError::corrupted(path, clip_err)),
            }
        }
        _ => Err(StorageError::corrupted(path, "expected a JSON object or array")),
    }
}
