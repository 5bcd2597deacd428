//! Core draft engine - storage, editing session, events
//!
//! These modules hold all draft semantics, independent of any front end.

pub mod draft_events;
pub mod editor;
pub mod error;
pub mod event_bus;
pub mod sidecar;
pub mod storage;

// Re-exports for convenience
pub use editor::DraftEditor;
pub use error::{Result, StorageError};
pub use event_bus::{DraftEventEmitter, EventBus};
pub use storage::DraftStorage;
