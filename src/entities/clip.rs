//! CompositionClip - enum wrapper for every item on the draft timeline.
//!
//! Serialized externally tagged: `{"cover": {...}}` / `{"video": {...}}`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cover::{CoverMetadata, CoverType};
use super::video::VideoClip;

/// One item of the composed timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionClip {
    Cover(CoverMetadata),
    Video(VideoClip),
}

impl CompositionClip {
    pub fn id(&self) -> Uuid {
        match self {
            CompositionClip::Cover(c) => c.id,
            CompositionClip::Video(v) => v.id,
        }
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        match self {
            CompositionClip::Cover(c) => c.duration,
            CompositionClip::Video(v) => v.duration,
        }
    }

    /// Check if this is a cover clip
    pub fn is_cover(&self) -> bool {
        matches!(self, CompositionClip::Cover(_))
    }

    /// Check if this is a video clip
    pub fn is_video(&self) -> bool {
        matches!(self, CompositionClip::Video(_))
    }

    /// Cover kind, None for videos
    pub fn cover_type(&self) -> Option<CoverType> {
        match self {
            CompositionClip::Cover(c) => Some(c.cover_type),
            CompositionClip::Video(_) => None,
        }
    }

    pub fn as_cover(&self) -> Option<&CoverMetadata> {
        match self {
            CompositionClip::Cover(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_video(&self) -> Option<&VideoClip> {
        match self {
            CompositionClip::Video(v) => Some(v),
            _ => None,
        }
    }

    /// Short label for listings: "intro", "outro" or the media file name.
    pub fn label(&self) -> String {
        match self {
            CompositionClip::Cover(c) => match &c.title {
                Some(title) => format!("{} \"{}\"", c.cover_type, title),
                None => c.cover_type.to_string(),
            },
            CompositionClip::Video(v) => v.file_name.clone(),
        }
    }
}

impl From<CoverMetadata> for CompositionClip {
    fn from(cover: CoverMetadata) -> Self {
        CompositionClip::Cover(cover)
    }
}

impl From<VideoClip> for CompositionClip {
    fn from(video: VideoClip) -> Self {
        CompositionClip::Video(video)
    }
}
