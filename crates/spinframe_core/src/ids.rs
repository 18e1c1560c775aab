//! Keypoint identity and selection

use crate::rotation::Axis;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque keypoint identifier, stable for the keypoint's lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeypointId(pub u64);

impl fmt::Display for KeypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kp-{}", self.0)
    }
}

/// Hands out keypoint ids from a monotonic counter.
///
/// Ids are never reused, even after the keypoint that held one is deleted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next id
    pub fn allocate(&mut self) -> KeypointId {
        let id = KeypointId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to `allocate` will return
    pub fn peek(&self) -> KeypointId {
        KeypointId(self.next)
    }

    /// Make sure `id` can never be handed out again.
    ///
    /// Used when keypoints come from outside the allocator (e.g. a loaded project).
    pub fn observe(&mut self, id: KeypointId) {
        if id.0 >= self.next {
            self.next = id.0 + 1;
        }
    }
}

/// The selected keypoint, referenced by axis and id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub axis: Axis,
    pub id: KeypointId,
}

impl Selection {
    pub fn new(axis: Axis, id: KeypointId) -> Self {
        Self { axis, id }
    }
}
