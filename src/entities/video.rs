//! Recorded video segment.
//!
//! The clip only carries metadata; its bytes live in `<file_name>.mp4`
//! inside the managed draft directory (see `DraftStorage::video_path`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoClip {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Stem of the media file, without extension
    pub file_name: String,
    /// Seconds
    pub duration: f64,
    #[serde(
        default,
        with = "super::bytes::base64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail: Option<Vec<u8>>,
}

impl VideoClip {
    pub fn new(file_name: impl Into<String>, duration: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            file_name: file_name.into(),
            duration,
            thumbnail: None,
        }
    }

    /// Clip for a fresh recording: the file is named after the clip id.
    pub fn recorded(duration: f64) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            created_at: Utc::now(),
            file_name: id.to_string(),
            duration,
            thumbnail: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: Vec<u8>) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_uses_id_as_file_name() {
        let clip = VideoClip::recorded(2.5);
        assert_eq!(clip.file_name, clip.id.to_string());
        assert_eq!(clip.duration, 2.5);
        assert!(clip.thumbnail.is_none());
    }

    #[test]
    fn test_camel_case_keys() {
        let clip = VideoClip::new("take_1", 1.0).with_thumbnail(vec![1, 2, 3]);
        let json = serde_json::to_value(&clip).unwrap();
        assert_eq!(json["fileName"], "take_1");
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["thumbnail"], "AQID");
    }
}
