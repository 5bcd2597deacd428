//! Pub/sub event bus for draft change notifications.
//!
//! - `subscribe::<E>()` registers a callback for one event type
//! - `emit()` runs the callbacks right away and also queues the event
//! - `poll()` drains the queue for callers that batch-process (a UI frame)
//!
//! Callbacks for the same event type run in subscription order. Nothing is
//! promised about ordering across event types.

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, RwLock};

use log::warn;

/// Queue bound. When reached, the older half is discarded.
const MAX_QUEUE_SIZE: usize = 1000;

/// Anything `Send + Sync + 'static` is an event.
pub trait Event: Any + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

pub type BoxedEvent = Box<dyn Event>;

type Callback = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// State shared by the bus and every emitter handle.
#[derive(Default)]
struct Shared {
    subscribers: RwLock<HashMap<TypeId, Vec<Callback>>>,
    queue: Mutex<VecDeque<BoxedEvent>>,
}

impl Shared {
    fn dispatch<E: Event>(&self, event: E) {
        {
            let subscribers = self.subscribers.read().unwrap_or_else(|e| e.into_inner());
            for cb in subscribers.get(&TypeId::of::<E>()).into_iter().flatten() {
                cb(&event);
            }
        }

        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= MAX_QUEUE_SIZE {
            let evict = queue.len() / 2;
            warn!(
                "EventBus queue full ({} events), dropping oldest {} (latest: {})",
                queue.len(),
                evict,
                event.type_name()
            );
            queue.drain(..evict);
        }
        queue.push_back(Box::new(event));
    }

    fn queue_len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Event bus owned by the front end. Cheap to clone.
#[derive(Clone, Default)]
pub struct EventBus {
    shared: Arc<Shared>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for events of type `E`.
    ///
    /// ```ignore
    /// bus.subscribe::<DraftChangedEvent, _>(|e| println!("{} clips", e.clips.len()));
    /// ```
    pub fn subscribe<E, F>(&self, callback: F)
    where
        E: Event,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: Callback = Arc::new(move |any: &dyn Any| {
            if let Some(event) = any.downcast_ref::<E>() {
                callback(event);
            }
        });
        self.shared
            .subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(TypeId::of::<E>())
            .or_default()
            .push(wrapped);
    }

    pub fn emit<E: Event + Clone>(&self, event: E) {
        self.shared.dispatch(event);
    }

    /// Take every queued event, oldest first.
    pub fn poll(&self) -> Vec<BoxedEvent> {
        let mut queue = self.shared.queue.lock().unwrap_or_else(|e| e.into_inner());
        queue.drain(..).collect()
    }

    /// Handle for code that produces events but doesn't own the bus.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn queue_len(&self) -> usize {
        self.shared.queue_len()
    }
}

/// Emit-only handle onto an `EventBus`.
#[derive(Clone)]
pub struct EventEmitter {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("queue_len", &self.shared.queue_len())
            .finish()
    }
}

impl EventEmitter {
    pub fn emit<E: Event + Clone>(&self, event: E) {
        self.shared.dispatch(event);
    }
}

/// Emitter held by a `DraftEditor`. Silent when no bus is attached.
#[derive(Clone, Default, Debug)]
pub struct DraftEventEmitter {
    inner: Option<EventEmitter>,
}

impl DraftEventEmitter {
    pub fn dummy() -> Self {
        Self { inner: None }
    }

    pub fn from_emitter(emitter: EventEmitter) -> Self {
        Self {
            inner: Some(emitter),
        }
    }

    pub fn emit<E: Event + Clone>(&self, event: E) {
        if let Some(emitter) = &self.inner {
            emitter.emit(event);
        }
    }
}

/// Downcast a polled event.
///
/// Derefs to `dyn Event` first: calling `as_any()` on the `Box` itself would
/// hit the blanket impl for `Box<dyn Event>` and never match.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}
