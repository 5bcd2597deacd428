//! Cover clips: title cards placed before (intro) and after (outro) the recordings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::DEFAULT_COVER_DURATION;

/// Which end of the timeline a cover belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverType {
    Intro,
    Outro,
}

impl std::fmt::Display for CoverType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverType::Intro => write!(f, "intro"),
            CoverType::Outro => write!(f, "outro"),
        }
    }
}

fn default_duration() -> f64 {
    DEFAULT_COVER_DURATION
}

/// Title card metadata.
///
/// Title and description hold plain text; styling is the editor's concern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverMetadata {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(
        default,
        with = "super::bytes::base64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail: Option<Vec<u8>>,
    #[serde(rename = "type")]
    pub cover_type: CoverType,
}

impl CoverMetadata {
    /// Blank cover of the given kind, used when a sequence is missing one.
    pub fn empty(cover_type: CoverType) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: None,
            description: None,
            date: None,
            duration: DEFAULT_COVER_DURATION,
            thumbnail: None,
            cover_type,
        }
    }

    pub fn intro() -> Self {
        Self::empty(CoverType::Intro)
    }

    pub fn outro() -> Self {
        Self::empty(CoverType::Outro)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: Vec<u8>) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }

    /// True if nothing was filled in beyond the defaults.
    pub fn is_blank(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.thumbnail.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cover_defaults() {
        let c = CoverMetadata::intro();
        assert_eq!(c.cover_type, CoverType::Intro);
        assert_eq!(c.duration, 1.0);
        assert!(c.is_blank());
    }

    #[test]
    fn test_type_key_and_lowercase() {
        let c = CoverMetadata::outro().with_title("Bye");
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["type"], "outro");
        assert_eq!(json["title"], "Bye");
        // Unset optionals are omitted
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_missing_duration_defaults() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"id":"{}","type":"intro"}}"#, id);
        let c: CoverMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(c.id, id);
        assert_eq!(c.duration, DEFAULT_COVER_DURATION);
        assert!(c.is_blank());
    }
}
