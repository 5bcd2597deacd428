//! DraftTimeline - intro / interior / outro split of a clip sequence.
//!
//! A persisted draft always has exactly two cover slots: the intro at
//! index 0 and the outro at the last index, with only video clips in
//! between. `DraftTimeline` holds that shape in its type; every write goes
//! through `from_clips` + `into_clips` so the shape is restored, not just
//! checked.
//!
//! # Extraction rules
//!
//! - intro: first cover of type `intro` (blank default if none)
//! - outro: last cover of type `outro` (blank default if none)
//! - interior: all video clips, relative order kept
//! - any other cover values are dropped

use log::debug;

use super::clip::CompositionClip;
use super::cover::{CoverMetadata, CoverType};
use super::video::VideoClip;

#[derive(Clone, Debug, PartialEq)]
pub struct DraftTimeline {
    pub intro: CoverMetadata,
    pub interior: Vec<VideoClip>,
    pub outro: CoverMetadata,
}

impl Default for DraftTimeline {
    fn default() -> Self {
        Self {
            intro: CoverMetadata::intro(),
            interior: Vec::new(),
            outro: CoverMetadata::outro(),
        }
    }
}

impl DraftTimeline {
    /// Split an arbitrary sequence into the three slots.
    pub fn from_clips(clips: Vec<CompositionClip>) -> Self {
        let mut intro: Option<CoverMetadata> = None;
        let mut outro: Option<CoverMetadata> = None;
        let mut interior = Vec::with_capacity(clips.len());
        let mut dropped = 0usize;

        for clip in clips {
            match clip {
                CompositionClip::Video(v) => interior.push(v),
                CompositionClip::Cover(c) => match c.cover_type {
                    CoverType::Intro if intro.is_none() => intro = Some(c),
                    // Last outro wins
                    CoverType::Outro => {
                        if outro.replace(c).is_some() {
                            dropped += 1;
                        }
                    }
                    CoverType::Intro => dropped += 1,
                },
            }
        }

        if dropped > 0 {
            debug!("DraftTimeline: dropped {} surplus cover(s)", dropped);
        }

        Self {
            intro: intro.unwrap_or_else(|| {
                debug!("DraftTimeline: no intro, using blank cover");
                CoverMetadata::intro()
            }),
            interior,
            outro: outro.unwrap_or_else(|| {
                debug!("DraftTimeline: no outro, using blank cover");
                CoverMetadata::outro()
            }),
        }
    }

    /// Flatten to `[intro] + interior + [outro]`.
    pub fn into_clips(self) -> Vec<CompositionClip> {
        let mut clips = Vec::with_capacity(self.interior.len() + 2);
        clips.push(CompositionClip::Cover(self.intro));
        clips.extend(self.interior.into_iter().map(CompositionClip::Video));
        clips.push(CompositionClip::Cover(self.outro));
        clips
    }
}

/// Restore intro-first / outro-last on any sequence. Idempotent.
pub fn normalize(clips: Vec<CompositionClip>) -> Vec<CompositionClip> {
    DraftTimeline::from_clips(clips).into_clips()
}

/// True if `clips` already has the persisted shape.
pub fn is_normalized(clips: &[CompositionClip]) -> bool {
    let n = clips.len();
    n >= 2
        && clips[0].cover_type() == Some(CoverType::Intro)
        && clips[n - 1].cover_type() == Some(CoverType::Outro)
        && clips[1..n - 1].iter().all(CompositionClip::is_video)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(name: &str) -> CompositionClip {
        VideoClip::new(name, 1.5).into()
    }

    fn names(clips: &[CompositionClip]) -> Vec<String> {
        clips.iter().map(|c| c.label()).collect()
    }

    #[test]
    fn test_empty_gets_both_covers() {
        let clips = normalize(Vec::new());
        assert_eq!(names(&clips), vec!["intro", "outro"]);
        assert!(is_normalized(&clips));
    }

    #[test]
    fn test_covers_move_to_ends() {
        let intro = CompositionClip::from(CoverMetadata::intro().with_title("Hi"));
        let outro = CompositionClip::from(CoverMetadata::outro().with_title("Bye"));
        let clips = normalize(vec![video("a"), outro.clone(), video("b"), intro.clone()]);

        assert_eq!(clips.len(), 4);
        assert_eq!(clips[0], intro);
        assert_eq!(clips[3], outro);
        assert_eq!(names(&clips[1..3]), vec!["a", "b"]);
    }

    #[test]
    fn test_first_intro_last_outro_win() {
        let i1 = CompositionClip::from(CoverMetadata::intro().with_title("i1"));
        let i2 = CompositionClip::from(CoverMetadata::intro().with_title("i2"));
        let o1 = CompositionClip::from(CoverMetadata::outro().with_title("o1"));
        let o2 = CompositionClip::from(CoverMetadata::outro().with_title("o2"));

        let clips = normalize(vec![i1.clone(), o1, video("a"), i2, o2.clone()]);
        assert_eq!(clips.len(), 3);
        assert_eq!(clips[0], i1);
        assert_eq!(names(&clips[1..2]), vec!["a"]);
        assert_eq!(clips[2], o2);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(vec![video("a"), video("b")]);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_invariant_after_random_edits() {
        let mut clips = normalize(Vec::new());
        for step in 0..20usize {
            match step % 4 {
                // insert anywhere, including the cover slots
                0 | 1 => {
                    let at = step % (clips.len() + 1);
                    clips.insert(at, video(&format!("v{}", step)));
                }
                // swap two positions, possibly moving a cover inward
                2 => {
                    let last = clips.len() - 1;
                    clips.swap(0, last / 2);
                }
                _ => {
                    clips.remove(clips.len() / 2);
                }
            }
            clips = normalize(clips);
            assert!(is_normalized(&clips), "step {}: {:?}", step, names(&clips));
        }
    }

    #[test]
    fn test_is_normalized_rejects_cover_inside() {
        let clips = vec![
            CoverMetadata::intro().into(),
            CoverMetadata::intro().into(),
            CoverMetadata::outro().into(),
        ];
        assert!(!is_normalized(&clips));
    }
}
