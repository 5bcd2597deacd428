//! Draft editing events.

use uuid::Uuid;

use crate::entities::{CompositionClip, CoverType};

/// Emitted after every successful commit with the sequence as persisted.
#[derive(Clone, Debug)]
pub struct DraftChangedEvent {
    pub clips: Vec<CompositionClip>,
}

#[derive(Clone, Debug)]
pub struct ClipRecordedEvent(pub Uuid);

#[derive(Clone, Debug)]
pub struct ClipMovedEvent {
    pub from: usize,
    pub to: usize,
}

#[derive(Clone, Debug)]
pub struct ClipRemovedEvent(pub Uuid);

#[derive(Clone, Debug)]
pub struct CoverUpdatedEvent(pub CoverType);

/// Whole draft deleted
#[derive(Clone, Debug)]
pub struct DraftResetEvent;
