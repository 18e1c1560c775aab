//! Editor event dispatch
//!
//! The editor never talks to rendering directly. Every observable change is
//! published as an [`EditorEvent`]; UI adapters register handlers for the
//! kinds they care about.

use crate::error::EditorWarning;
use crate::ids::{KeypointId, Selection};
use crate::rotation::{Axis, Rotation};
use rustc_hash::FxHashMap;

/// Notification emitted after the editor state changed
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    KeypointAdded {
        axis: Axis,
        id: KeypointId,
        time: f32,
    },
    KeypointRemoved {
        axis: Axis,
        id: KeypointId,
    },
    KeypointMoved {
        axis: Axis,
        id: KeypointId,
        time: f32,
    },
    EasingChanged {
        axis: Axis,
        id: KeypointId,
    },
    SelectionChanged(Option<Selection>),
    /// Timeline length changed; marker positions must be re-derived
    DurationChanged(f32),
    /// Playhead moved (scrub or playback)
    PlayheadMoved(f32),
    /// Live preview transform changed
    PreviewChanged(Rotation),
    PlaybackStarted {
        duration: f32,
    },
    PlaybackStopped {
        reset_to_zero: bool,
    },
    PlaybackFinished,
    Warning(EditorWarning),
}

/// Discriminant of [`EditorEvent`], used as the registration key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeypointAdded,
    KeypointRemoved,
    KeypointMoved,
    EasingChanged,
    SelectionChanged,
    DurationChanged,
    PlayheadMoved,
    PreviewChanged,
    PlaybackStarted,
    PlaybackStopped,
    PlaybackFinished,
    Warning,
}

impl EditorEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            EditorEvent::KeypointAdded { .. } => EventKind::KeypointAdded,
            EditorEvent::KeypointRemoved { .. } => EventKind::KeypointRemoved,
            EditorEvent::KeypointMoved { .. } => EventKind::KeypointMoved,
            EditorEvent::EasingChanged { .. } => EventKind::EasingChanged,
            EditorEvent::SelectionChanged(_) => EventKind::SelectionChanged,
            EditorEvent::DurationChanged(_) => EventKind::DurationChanged,
            EditorEvent::PlayheadMoved(_) => EventKind::PlayheadMoved,
            EditorEvent::PreviewChanged(_) => EventKind::PreviewChanged,
            EditorEvent::PlaybackStarted { .. } => EventKind::PlaybackStarted,
            EditorEvent::PlaybackStopped { .. } => EventKind::PlaybackStopped,
            EditorEvent::PlaybackFinished => EventKind::PlaybackFinished,
            EditorEvent::Warning(_) => EventKind::Warning,
        }
    }

    /// The track this event touches, if any
    pub fn axis(&self) -> Option<Axis> {
        match self {
            EditorEvent::KeypointAdded { axis, .. }
            | EditorEvent::KeypointRemoved { axis, .. }
            | EditorEvent::KeypointMoved { axis, .. }
            | EditorEvent::EasingChanged { axis, .. } => Some(*axis),
            _ => None,
        }
    }
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&EditorEvent) + Send + Sync>;

/// Dispatches editor events to registered handlers
pub struct EventDispatcher {
    handlers: FxHashMap<EventKind, Vec<EventHandler>>,
    catch_all: Vec<EventHandler>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
            catch_all: Vec::new(),
        }
    }

    /// Register a handler for one kind of event
    pub fn register<F>(&mut self, kind: EventKind, handler: F)
    where
        F: Fn(&EditorEvent) + Send + Sync + 'static,
    {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Register a handler that receives every event
    pub fn register_all<F>(&mut self, handler: F)
    where
        F: Fn(&EditorEvent) + Send + Sync + 'static,
    {
        self.catch_all.push(Box::new(handler));
    }

    /// Dispatch an event to all matching handlers, in registration order
    pub fn dispatch(&self, event: &EditorEvent) {
        if let Some(handlers) = self.handlers.get(&event.kind()) {
            for handler in handlers {
                handler(event);
            }
        }
        for handler in &self.catch_all {
            handler(event);
        }
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.values().map(Vec::len).sum::<usize>() + self.catch_all.len()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
