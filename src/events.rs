//! Controller events and the listener registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Error;
use crate::models::Station;

/// Names a controller event handlers can subscribe to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EventKind {
    Play,
    Pause,
    Stop,
    Error,
    VolumeChange,
    StationChange,
}

/// Event payload passed to handlers.
#[derive(Debug)]
pub enum Event {
    Play,
    Pause,
    Stop,
    Error(Error),
    VolumeChange(f32),
    StationChange(Station),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Play => EventKind::Play,
            Self::Pause => EventKind::Pause,
            Self::Stop => EventKind::Stop,
            Self::Error(_) => EventKind::Error,
            Self::VolumeChange(_) => EventKind::VolumeChange,
            Self::StationChange(_) => EventKind::StationChange,
        }
    }
}

/// Shareable event callback.
///
/// Two handlers are equal when they are clones of the same `Handler`, so keep
/// a clone around to unregister it later.
#[derive(Clone)]
pub struct Handler(Arc<dyn Fn(&Event) + Send + Sync>);

impl Handler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    fn call(&self, event: &Event) {
        (self.0)(event)
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.addr()).finish()
    }
}

#[derive(Debug, Default)]
pub(crate) struct Listeners {
    handlers: Mutex<HashMap<EventKind, Vec<Handler>>>,
}

impl Listeners {
    pub fn on(&self, kind: EventKind, handler: Handler) {
        self.lock().entry(kind).or_default().push(handler);
    }

    /// Removes the first registration of `handler` for `kind`.
    pub fn off(&self, kind: EventKind, handler: &Handler) {
        if let Some(handlers) = self.lock().get_mut(&kind) {
            if let Some(index) = handlers.iter().position(|h| h == handler) {
                handlers.remove(index);
            }
        }
    }

    /// Calls handlers registered for the event kind, in registration order.
    ///
    /// Runs over a snapshot, handlers may register or remove listeners.
    pub fn emit(&self, event: &Event) {
        let handlers = self.lock().get(&event.kind()).cloned().unwrap_or_default();

        for handler in handlers {
            handler.call(event);
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    #[cfg(test)]
    pub fn count(&self, kind: EventKind) -> usize {
        self.lock().get(&kind).map_or(0, Vec::len)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<EventKind, Vec<Handler>>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
