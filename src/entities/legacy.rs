//! VideoDraft - pre-timeline draft record.
//!
//! Early sidecars stored each recording as one self-contained value with
//! the video bytes inlined. These are only read back during migration;
//! new writes always use `CompositionClip` plus a media file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::video::VideoClip;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDraft {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub duration: f64,
    #[serde(with = "super::bytes::base64_bytes")]
    pub thumbnail: Vec<u8>,
    #[serde(with = "super::bytes::base64_bytes")]
    pub video: Vec<u8>,
}

impl VideoDraft {
    /// Split into timeline metadata and the media bytes to write to disk.
    ///
    /// The media file is named after the draft id. An empty thumbnail
    /// becomes `None`.
    pub fn into_clip(self) -> (VideoClip, Vec<u8>) {
        let clip = VideoClip {
            id: self.id,
            created_at: self.created_at,
            file_name: self.id.to_string(),
            duration: self.duration,
            thumbnail: (!self.thumbnail.is_empty()).then_some(self.thumbnail),
        };
        (clip, self.video)
    }
}
