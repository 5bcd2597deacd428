//! DraftStorage: file-system store for one draft.
//!
//! Layout of the managed directory:
//! ```text
//! <data dir>/<name>/
//!     <name>Drafts.json      sidecar: ordered clip metadata
//!     <file_name>.mp4        one media file per video clip
//! ```
//!
//! `update_clips` is the only sidecar write path. It normalizes the
//! sequence (intro first, outro last) and replaces the sidecar atomically:
//! the bytes go to a temp file in the same directory, get synced, then the
//! temp file is renamed over the old sidecar. A failed write leaves the
//! previous sidecar untouched.
//!
//! Media copies/deletes are not tied to the sidecar write. A crash between
//! the two leaves an unreferenced media file behind; `prune_orphans`
//! collects those.

use std::collections::HashSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, trace, warn};
use tempfile::NamedTempFile;

use super::error::{Result, StorageError};
use super::sidecar::{self, SidecarContents};
use crate::config::{self, PathConfig, SIDECAR_VERSION, VIDEO_EXTENSION};
use crate::entities::{
    CompositionClip, CoverMetadata, CoverType, VideoClip, VideoDraft, is_normalized, normalize,
};

#[derive(Debug, Clone)]
pub struct DraftStorage {
    directory: PathBuf,
    sidecar: PathBuf,
}

impl DraftStorage {
    /// Open `<data dir>/<directory_name>`, creating it if needed.
    pub fn new(config: &PathConfig, directory_name: &str) -> Result<Self> {
        Self::open(config::data_dir(config), directory_name)
    }

    /// Open `<root>/<directory_name>`, creating it if needed.
    pub fn open(root: impl AsRef<Path>, directory_name: &str) -> Result<Self> {
        let directory = root.as_ref().join(directory_name);
        if let Err(e) = fs::create_dir_all(&directory) {
            warn!("Cannot create draft directory {}: {}", directory.display(), e);
            return Err(StorageError::DirectoryNotFound(directory));
        }
        let sidecar = directory.join(config::sidecar_name(directory_name));
        debug!("DraftStorage opened: {}", sidecar.display());
        Ok(Self { directory, sidecar })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn sidecar_path(&self) -> &Path {
        &self.sidecar
    }

    /// `<directory>/<file_name>.mp4`
    pub fn video_path(&self, file_name: &str) -> PathBuf {
        self.directory.join(format!("{}.{}", file_name, VIDEO_EXTENSION))
    }

    /// Move a finished recording into the draft and insert its clip.
    ///
    /// The index is clamped to `[0, count]`. The temporary source is removed
    /// after copying; failing to remove it is logged and ignored.
    pub fn save_video_clip(
        &self,
        clip: VideoClip,
        at_index: usize,
        current_clips: &[CompositionClip],
        source_temp_path: &Path,
    ) -> Result<Vec<CompositionClip>> {
        check_file_name(&clip.file_name)?;
        if !source_temp_path.exists() {
            return Err(StorageError::FileNotFound(source_temp_path.to_path_buf()));
        }
        self.check_directory()?;

        let destination = self.video_path(&clip.file_name);
        if is_same_file(source_temp_path, &destination) {
            debug!("Recording already in place: {}", destination.display());
        } else {
            fs::copy(source_temp_path, &destination)
                .map_err(|e| StorageError::io(&destination, e))?;
            trace!(
                "Copied {} -> {}",
                source_temp_path.display(),
                destination.display()
            );
            if let Err(e) = fs::remove_file(source_temp_path) {
                warn!(
                    "Failed to remove temporary recording {}: {}",
                    source_temp_path.display(),
                    e
                );
            }
        }

        let mut clips = current_clips.to_vec();
        let at = at_index.min(clips.len());
        info!("Inserting clip {} at {} (requested {})", clip.id, at, at_index);
        clips.insert(at, CompositionClip::Video(clip));
        self.update_clips(clips)
    }

    /// Overwrite the intro (index 0) or outro (last index) slot.
    ///
    /// Interior clips are left as they are. Fails with `CoverSlotMissing`
    /// if the sequence is too short or the slot doesn't hold a cover.
    pub fn save_cover_metadata(
        &self,
        cover: CoverMetadata,
        current_clips: &[CompositionClip],
    ) -> Result<Vec<CompositionClip>> {
        let kind = cover.cover_type;
        let len = current_clips.len();
        if len < 2 {
            return Err(StorageError::CoverSlotMissing(kind));
        }
        let slot = match kind {
            CoverType::Intro => 0,
            CoverType::Outro => len - 1,
        };
        if !current_clips[slot].is_cover() {
            return Err(StorageError::CoverSlotMissing(kind));
        }

        let mut clips = current_clips.to_vec();
        clips[slot] = CompositionClip::Cover(cover);
        info!("Replaced {} cover", kind);
        self.update_clips(clips)
    }

    /// Read the sidecar. No sidecar yet means an empty draft.
    ///
    /// Older layouts are migrated and rewritten on the way in.
    pub fn load_all(&self) -> Result<Vec<CompositionClip>> {
        let bytes = match fs::read(&self.sidecar) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No sidecar at {}, starting empty", self.sidecar.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::io(&self.sidecar, e)),
        };

        let contents = sidecar::decode(&bytes, &self.sidecar)?;
        if contents.needs_migration() {
            info!("Migrating {} to sidecar version {}", self.sidecar.display(), SIDECAR_VERSION);
        }
        match contents {
            SidecarContents::Current(clips) => {
                debug!("Loaded {} clip(s) from {}", clips.len(), self.sidecar.display());
                if is_normalized(&clips) {
                    return Ok(clips);
                }
                // Hand-edited or foreign file: fix the shape in memory, next write persists it
                let clips = normalize(clips);
                debug!("Normalized loaded sidecar to {} clip(s)", clips.len());
                Ok(clips)
            }
            SidecarContents::Unversioned(clips) => self.update_clips(clips),
            SidecarContents::Legacy(drafts) => self.migrate_drafts(drafts),
        }
    }

    /// Remove one media file. Missing files are fine.
    pub fn delete_video(&self, file_name: &str) -> Result<()> {
        check_file_name(file_name)?;
        let path = self.video_path(file_name);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Deleted {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!("delete_video: {} already gone", path.display());
                Ok(())
            }
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    /// Drop the whole draft: directory removed and recreated empty.
    pub fn delete_all(&self) -> Result<()> {
        match fs::remove_dir_all(&self.directory) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(StorageError::io(&self.directory, e)),
        }
        if let Err(e) = fs::create_dir_all(&self.directory) {
            warn!("Cannot recreate {}: {}", self.directory.display(), e);
            return Err(StorageError::DirectoryNotFound(self.directory.clone()));
        }
        info!("Draft reset: {}", self.directory.display());
        Ok(())
    }

    /// Normalize and persist. Returns the sequence as written.
    ///
    /// Rejects non-finite or negative durations and media names that would
    /// leave the draft directory; nothing is written in that case.
    pub fn update_clips(&self, clips: Vec<CompositionClip>) -> Result<Vec<CompositionClip>> {
        let clips = normalize(clips);
        validate(&clips)?;
        let bytes =
            sidecar::encode(&clips).map_err(|e| StorageError::corrupted(&self.sidecar, e))?;
        self.check_directory()?;
        write_atomic(&self.sidecar, &bytes)?;
        info!("Saved {} clip(s) to {}", clips.len(), self.sidecar.display());
        Ok(clips)
    }

    /// Delete media files no clip in `clips` refers to. Returns removed paths.
    pub fn prune_orphans(&self, clips: &[CompositionClip]) -> Result<Vec<PathBuf>> {
        let referenced: HashSet<PathBuf> = clips
            .iter()
            .filter_map(CompositionClip::as_video)
            .map(|v| self.video_path(&v.file_name))
            .collect();

        let entries = fs::read_dir(&self.directory).map_err(|e| StorageError::io(&self.directory, e))?;
        let mut removed = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| StorageError::io(&self.directory, e))?.path();
            let is_media = path.extension().and_then(|s| s.to_str()) == Some(VIDEO_EXTENSION);
            if is_media && !referenced.contains(&path) {
                fs::remove_file(&path).map_err(|e| StorageError::io(&path, e))?;
                info!("Pruned orphaned media {}", path.display());
                removed.push(path);
            }
        }
        Ok(removed)
    }

    fn check_directory(&self) -> Result<()> {
        if self.directory.is_dir() {
            Ok(())
        } else {
            Err(StorageError::DirectoryNotFound(self.directory.clone()))
        }
    }

    fn migrate_drafts(&self, drafts: Vec<VideoDraft>) -> Result<Vec<CompositionClip>> {
        info!("Migrating {} legacy draft(s) to media files", drafts.len());
        self.check_directory()?;
        let mut clips = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let (clip, bytes) = draft.into_clip();
            let path = self.video_path(&clip.file_name);
            write_atomic(&path, &bytes)?;
            debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
            clips.push(CompositionClip::Video(clip));
        }
        self.update_clips(clips)
    }
}

/// Replace `path` with `bytes` via temp file + rename in the same directory.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| StorageError::DirectoryNotFound(path.to_path_buf()))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
    tmp.write_all(bytes)
        .map_err(|e| StorageError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StorageError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| StorageError::io(path, e.error))?;
    Ok(())
}

/// Every clip must survive a JSON round trip and stay inside the draft directory.
fn validate(clips: &[CompositionClip]) -> Result<()> {
    for clip in clips {
        let duration = clip.duration();
        if !duration.is_finite() || duration < 0.0 {
            return Err(StorageError::InvalidDuration {
                id: clip.id(),
                duration,
            });
        }
        if let Some(video) = clip.as_video() {
            check_file_name(&video.file_name)?;
        }
    }
    Ok(())
}

/// A media name is one plain path component: no separators, not `.`/`..`.
fn check_file_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(StorageError::InvalidFileName(name.to_string()));
    }
    Ok(())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
