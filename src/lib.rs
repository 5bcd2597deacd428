//! MySeconds - draft clip store library
//!
//! Re-exports all modules for use by the binary target.

// Core engine (storage, editor, events)
pub mod core;

// App modules
pub mod cli;
pub mod config;
pub mod entities;

// Re-export commonly used types from core
pub use core::editor::DraftEditor;
pub use core::error::{Result, StorageError};
pub use core::event_bus::{BoxedEvent, DraftEventEmitter, EventBus, EventEmitter, downcast_event};
pub use core::storage::DraftStorage;

// Re-export entities
pub use entities::{CompositionClip, CoverMetadata, CoverType, DraftTimeline, VideoClip};
