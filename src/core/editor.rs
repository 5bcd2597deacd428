//! DraftEditor: working copy of the clip sequence for one editing session.
//!
//! Every mutation builds a new sequence, pushes it through
//! `DraftStorage::update_clips` and only then replaces the working copy, so a
//! failed write leaves both the sidecar and the in-memory sequence as they
//! were. After each commit a `DraftChangedEvent` carries the persisted
//! sequence to subscribers.
//!
//! Reordering is restricted to interior positions here, not only in the
//! front end: index 0 and the last index are the cover slots.

use std::path::Path;

use log::{debug, info, warn};

use super::draft_events::{
    ClipMovedEvent, ClipRecordedEvent, ClipRemovedEvent, CoverUpdatedEvent, DraftChangedEvent,
    DraftResetEvent,
};
use super::error::{Result, StorageError};
use super::event_bus::DraftEventEmitter;
use super::storage::DraftStorage;
use crate::entities::{CompositionClip, CoverMetadata, DraftTimeline, VideoClip};

#[derive(Debug)]
pub struct DraftEditor {
    storage: DraftStorage,
    clips: Vec<CompositionClip>,
    emitter: DraftEventEmitter,
}

impl DraftEditor {
    /// Load the draft. An empty draft starts as blank `[intro, outro]`
    /// (in memory only; nothing is written until the first edit).
    pub fn open(storage: DraftStorage) -> Result<Self> {
        let mut clips = storage.load_all()?;
        if clips.is_empty() {
            clips = DraftTimeline::default().into_clips();
        }
        debug!("DraftEditor: {} clip(s)", clips.len());
        Ok(Self {
            storage,
            clips,
            emitter: DraftEventEmitter::dummy(),
        })
    }

    pub fn with_emitter(mut self, emitter: DraftEventEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn clips(&self) -> &[CompositionClip] {
        &self.clips
    }

    pub fn storage(&self) -> &DraftStorage {
        &self.storage
    }

    pub fn video_count(&self) -> usize {
        self.clips.iter().filter(|c| c.is_video()).count()
    }

    /// Seconds, covers included
    pub fn total_duration(&self) -> f64 {
        self.clips.iter().map(CompositionClip::duration).sum()
    }

    /// Valid drag source / drop target: strictly between the cover slots.
    pub fn can_drop_at(&self, index: usize) -> bool {
        index > 0 && index + 1 < self.clips.len()
    }

    /// Drag-and-drop reorder: remove at `from`, reinsert at `to`.
    pub fn move_clip(&mut self, from: usize, to: usize) -> Result<()> {
        if !self.can_drop_at(from) || !self.can_drop_at(to) {
            return Err(StorageError::InvalidMove {
                from,
                to,
                len: self.clips.len(),
            });
        }
        if from == to {
            return Ok(());
        }

        let mut clips = self.clips.clone();
        let clip = clips.remove(from);
        clips.insert(to, clip);
        self.commit(clips)?;
        self.emitter.emit(ClipMovedEvent { from, to });
        Ok(())
    }

    /// Remove by value. Video clips take their media file with them.
    ///
    /// Removing a cover resets that slot to a blank cover.
    pub fn delete_clip(&mut self, clip: &CompositionClip) -> Result<()> {
        let pos = self
            .clips
            .iter()
            .position(|c| c == clip)
            .ok_or(StorageError::ClipNotFound(clip.id()))?;

        let mut clips = self.clips.clone();
        let removed = clips.remove(pos);
        self.commit(clips)?;

        // Sidecar first: a failed media delete leaves an orphan, never a dangling clip
        if let Some(video) = removed.as_video() {
            if let Err(e) = self.storage.delete_video(&video.file_name) {
                warn!("Clip removed but media kept ({}), prune will collect it", e);
            }
        }
        info!("Removed {} from draft", removed.label());
        self.emitter.emit(ClipRemovedEvent(removed.id()));
        Ok(())
    }

    /// Delete the clip at `index` (convenience for index-based front ends).
    pub fn delete_at(&mut self, index: usize) -> Result<()> {
        let clip = self.clips.get(index).cloned().ok_or(StorageError::IndexOutOfRange {
            index,
            len: self.clips.len(),
        })?;
        self.delete_clip(&clip)
    }

    /// Add a finished recording just before the outro.
    pub fn record_clip(&mut self, clip: VideoClip, source_temp_path: &Path) -> Result<()> {
        let at = self.clips.len().saturating_sub(1);
        self.record_clip_at(clip, at, source_temp_path)
    }

    /// Add a finished recording at `index`, kept between the cover slots.
    pub fn record_clip_at(
        &mut self,
        clip: VideoClip,
        index: usize,
        source_temp_path: &Path,
    ) -> Result<()> {
        let id = clip.id;
        let at = index.clamp(1, self.clips.len().saturating_sub(1).max(1));
        let clips = self
            .storage
            .save_video_clip(clip, at, &self.clips, source_temp_path)?;
        self.apply(clips);
        self.emitter.emit(ClipRecordedEvent(id));
        Ok(())
    }

    /// Replace the intro or outro cover.
    pub fn set_cover(&mut self, cover: CoverMetadata) -> Result<()> {
        let kind = cover.cover_type;
        let clips = self.storage.save_cover_metadata(cover, &self.clips)?;
        self.apply(clips);
        self.emitter.emit(CoverUpdatedEvent(kind));
        Ok(())
    }

    /// Delete every clip and media file; start over with blank covers.
    pub fn reset(&mut self) -> Result<()> {
        self.storage.delete_all()?;
        self.apply(DraftTimeline::default().into_clips());
        self.emitter.emit(DraftResetEvent);
        Ok(())
    }

    fn commit(&mut self, clips: Vec<CompositionClip>) -> Result<()> {
        let written = self.storage.update_clips(clips)?;
        self.apply(written);
        Ok(())
    }

    fn apply(&mut self, clips: Vec<CompositionClip>) {
        self.clips = clips;
        self.emitter.emit(DraftChangedEvent {
            clips: self.clips.clone(),
        });
    }
}
