//! Drag gesture sessions
//!
//! Each drag is a tiny state machine:
//!
//! ```text
//! Pressed --move--> Dragging --move--> Dragging
//!    |                  |
//!    +----release-------+----release--> Released
//! ```
//!
//! The runtime keeps one session per active drag. A pointer release ends
//! every session at once, wherever the pointer is at that moment, so a drag
//! can never get stuck.

use crate::ids::Selection;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Unique identifier for an active drag session
    pub struct GestureId;
}

/// Pointer position reported by the UI adapter.
///
/// Playhead and keypoint drags report `x` as a fraction of the timeline width.
/// Curve handle drags report pixels on the curve editor canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What a drag is moving
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragTarget {
    /// The timeline playhead (scrubbing)
    Playhead,
    /// A keypoint marker (retiming)
    Keypoint(Selection),
    /// One of the two curve editor handles (0 or 1)
    CurveHandle(usize),
}

/// Lifecycle of one drag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Pressed,
    Dragging,
    Released,
}

/// Pointer input driving a drag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerInput {
    Move,
    Release,
}

impl DragPhase {
    /// Transition table; `None` means the input is ignored in this phase
    fn next(self, input: PointerInput) -> Option<DragPhase> {
        match (self, input) {
            (DragPhase::Pressed, PointerInput::Move) => Some(DragPhase::Dragging),
            (DragPhase::Dragging, PointerInput::Move) => Some(DragPhase::Dragging),
            (DragPhase::Pressed, PointerInput::Release)
            | (DragPhase::Dragging, PointerInput::Release) => Some(DragPhase::Released),
            (DragPhase::Released, _) => None,
        }
    }
}

/// A single drag, from press to release
#[derive(Clone, Debug)]
pub struct DragSession {
    target: DragTarget,
    phase: DragPhase,
    origin: PointerPos,
    position: PointerPos,
    /// Phase changes (for debugging)
    history: SmallVec<[(DragPhase, PointerInput, DragPhase); 4]>,
}

impl DragSession {
    fn new(target: DragTarget, origin: PointerPos) -> Self {
        Self {
            target,
            phase: DragPhase::Pressed,
            origin,
            position: origin,
            history: SmallVec::new(),
        }
    }

    fn send(&mut self, input: PointerInput) -> DragPhase {
        let Some(to) = self.phase.next(input) else {
            return self.phase;
        };
        if to != self.phase {
            self.history.push((self.phase, input, to));
        }
        self.phase = to;
        to
    }

    pub fn target(&self) -> DragTarget {
        self.target
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Position at press time
    pub fn origin(&self) -> PointerPos {
        self.origin
    }

    /// Latest pointer position
    pub fn position(&self) -> PointerPos {
        self.position
    }

    /// True once the pointer moved after the press
    pub fn has_moved(&self) -> bool {
        self.history
            .iter()
            .any(|(_, _, to)| *to == DragPhase::Dragging)
    }

    pub fn history(&self) -> &[(DragPhase, PointerInput, DragPhase)] {
        &self.history
    }
}

/// Runtime that owns every active drag session
pub struct GestureRuntime {
    sessions: SlotMap<GestureId, DragSession>,
}

impl GestureRuntime {
    pub fn new() -> Self {
        Self {
            sessions: SlotMap::with_key(),
        }
    }

    /// Begin a drag. A previous drag of the same target is released first.
    pub fn press(&mut self, target: DragTarget, pos: PointerPos) -> GestureId {
        if let Some(existing) = self.find(target) {
            self.release(existing);
        }
        tracing::trace!(?target, x = pos.x, y = pos.y, "drag pressed");
        self.sessions.insert(DragSession::new(target, pos))
    }

    /// Move one drag
    pub fn move_to(&mut self, id: GestureId, pos: PointerPos) -> Option<&DragSession> {
        let session = self.sessions.get_mut(id)?;
        session.position = pos;
        session.send(PointerInput::Move);
        Some(session)
    }

    /// Move every active drag (document-level pointer move).
    ///
    /// Returns the targets that moved, in no particular order.
    pub fn move_all(&mut self, pos: PointerPos) -> SmallVec<[DragTarget; 2]> {
        let mut moved = SmallVec::new();
        for (_, session) in self.sessions.iter_mut() {
            session.position = pos;
            session.send(PointerInput::Move);
            moved.push(session.target);
        }
        moved
    }

    /// Release one drag
    pub fn release(&mut self, id: GestureId) -> Option<DragSession> {
        let mut session = self.sessions.remove(id)?;
        session.send(PointerInput::Release);
        tracing::trace!(target = ?session.target, "drag released");
        Some(session)
    }

    /// Release every active drag, wherever the pointer was released
    pub fn release_all(&mut self) -> Vec<DragSession> {
        let ids: Vec<GestureId> = self.sessions.keys().collect();
        ids.into_iter().filter_map(|id| self.release(id)).collect()
    }

    /// Find the active drag for a target
    pub fn find(&self, target: DragTarget) -> Option<GestureId> {
        self.sessions
            .iter()
            .find(|(_, session)| session.target == target)
            .map(|(id, _)| id)
    }

    pub fn get(&self, id: GestureId) -> Option<&DragSession> {
        self.sessions.get(id)
    }

    /// Check if any drag is in progress
    pub fn is_dragging(&self) -> bool {
        !self.sessions.is_empty()
    }

    /// Check if a specific target is being dragged
    pub fn is_dragging_target(&self, target: DragTarget) -> bool {
        self.find(target).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for GestureRuntime {
    fn default() -> Self {
        Self::new()
    }
}
