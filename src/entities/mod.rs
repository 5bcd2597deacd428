//! Entities module - draft timeline value types
//!
//! - `CompositionClip`: one timeline item (cover or video)
//! - `CoverMetadata` / `VideoClip`: the two payloads
//! - `DraftTimeline`: intro / interior / outro split used on every write
//! - `VideoDraft`: legacy self-contained record, read only for migration

pub mod bytes;
pub mod clip;
pub mod cover;
pub mod legacy;
pub mod timeline;
pub mod video;

pub use clip::CompositionClip;
pub use cover::{CoverMetadata, CoverType};
pub use legacy::VideoDraft;
pub use timeline::{DraftTimeline, is_normalized, normalize};
pub use video::VideoClip;
