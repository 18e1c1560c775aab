//! Keypoint tracks
//!
//! One [`Track`] per rotation axis holds that axis' keypoints, always sorted
//! by time. The [`KeypointStore`] owns the three tracks together with the id
//! allocator and the time grid, and is the only place keypoints are mutated.
//!
//! Duplicate times inside a track are allowed. Sorting is stable, so
//! keypoints sharing a time keep their relative order.

use crate::easing::{Easing, EasingCurve};
use serde::{Deserialize, Serialize};
use spinframe_core::{Axis, IdAllocator, KeypointId};

/// A single control point on one axis' track
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub id: KeypointId,
    /// Time in seconds (quantized, non-negative)
    pub time: f32,
    /// Rotation in degrees, unclamped
    pub value: f32,
    /// Easing for the segment arriving at this keypoint
    #[serde(default)]
    pub easing: Easing,
}

/// Latest time a keypoint can sit at, in seconds (one day)
pub const MAX_TIME: f32 = 86_400.0;

/// Snapping rule applied to keypoint and playhead times
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    /// Grid spacing in seconds
    pub step: f32,
    /// Times below this snap to exactly zero
    pub snap_to_zero: f32,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            step: 0.2,
            snap_to_zero: 0.1,
        }
    }
}

impl TimeGrid {
    /// Quantize a raw time onto the grid.
    ///
    /// Values below `snap_to_zero` (and non-finite input) become `0.0`, times
    /// past [`MAX_TIME`] clamp to it, everything else rounds to the nearest
    /// multiple of `step`. The result is rounded to four decimals so `3 × 0.2`
    /// is stored as `0.6`.
    pub fn quantize(&self, raw: f32) -> f32 {
        if !raw.is_finite() || raw < self.snap_to_zero {
            return 0.0;
        }
        let raw = f64::from(raw.min(MAX_TIME));
        if self.step <= 0.0 {
            return round_decimals(raw);
        }
        let step = f64::from(self.step);
        round_decimals((raw / step).round() * step).min(MAX_TIME)
    }
}

fn round_decimals(value: f64) -> f32 {
    ((value * 10_000.0).round() / 10_000.0) as f32
}

/// Keypoints of one axis, sorted by time ascending
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Track {
    keypoints: Vec<Keypoint>,
}

impl Track {
    pub fn new() -> Self {
        Self {
            keypoints: Vec::new(),
        }
    }

    /// Build a track from keypoints in any order
    pub fn from_keypoints(keypoints: Vec<Keypoint>) -> Self {
        let mut track = Self { keypoints };
        track.sort();
        track
    }

    /// The keypoints, sorted by time
    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    pub fn first(&self) -> Option<&Keypoint> {
        self.keypoints.first()
    }

    pub fn last(&self) -> Option<&Keypoint> {
        self.keypoints.last()
    }

    pub fn get(&self, id: KeypointId) -> Option<&Keypoint> {
        self.keypoints.iter().find(|kp| kp.id == id)
    }

    fn get_mut(&mut self, id: KeypointId) -> Option<&mut Keypoint> {
        self.keypoints.iter_mut().find(|kp| kp.id == id)
    }

    /// Position of a keypoint in time order
    pub fn index_of(&self, id: KeypointId) -> Option<usize> {
        self.keypoints.iter().position(|kp| kp.id == id)
    }

    /// Latest keypoint time on this track
    pub fn max_time(&self) -> Option<f32> {
        self.keypoints.last().map(|kp| kp.time)
    }

    fn insert(&mut self, keypoint: Keypoint) {
        self.keypoints.push(keypoint);
        self.sort();
    }

    fn remove(&mut self, id: KeypointId) -> Option<Keypoint> {
        let index = self.index_of(id)?;
        Some(self.keypoints.remove(index))
    }

    fn sort(&mut self) {
        self.keypoints.sort_by(|a, b| a.time.total_cmp(&b.time));
    }
}

/// The three per-axis tracks
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackSet {
    #[serde(default)]
    pub x: Track,
    #[serde(default)]
    pub y: Track,
    #[serde(default)]
    pub z: Track,
}

impl TrackSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, axis: Axis) -> &Track {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut Track {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }

    /// Iterate tracks in axis order
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &Track)> {
        Axis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }

    /// Every keypoint of every track
    pub fn keypoints(&self) -> impl Iterator<Item = &Keypoint> {
        self.iter().flat_map(|(_, track)| track.keypoints().iter())
    }

    /// Total keypoints across all axes
    pub fn total_keypoints(&self) -> usize {
        self.iter().map(|(_, track)| track.len()).sum()
    }

    /// Latest keypoint time across all axes (`None` if empty)
    pub fn max_time(&self) -> Option<f32> {
        self.iter()
            .filter_map(|(_, track)| track.max_time())
            .reduce(f32::max)
    }

    pub fn is_empty(&self) -> bool {
        self.total_keypoints() == 0
    }
}

/// Owner of all keypoint tracks; every mutation re-sorts the affected track.
///
/// Operations on unknown ids are silent no-ops: the UI can hold stale
/// references after a concurrent edit, and that is never an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeypointStore {
    tracks: TrackSet,
    #[serde(default)]
    ids: IdAllocator,
    #[serde(skip)]
    grid: TimeGrid,
}

impl KeypointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a custom time grid
    pub fn with_grid(grid: TimeGrid) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    pub fn tracks(&self) -> &TrackSet {
        &self.tracks
    }

    pub fn track(&self, axis: Axis) -> &Track {
        self.tracks.get(axis)
    }

    pub fn grid(&self) -> TimeGrid {
        self.grid
    }

    pub fn set_grid(&mut self, grid: TimeGrid) {
        self.grid = grid;
    }

    pub fn total_keypoints(&self) -> usize {
        self.tracks.total_keypoints()
    }

    pub fn get(&self, axis: Axis, id: KeypointId) -> Option<&Keypoint> {
        self.tracks.get(axis).get(id)
    }

    /// Add a keypoint with linear easing at the quantized time
    pub fn add_keypoint(&mut self, axis: Axis, time: f32, value: f32) -> KeypointId {
        let id = self.ids.allocate();
        let time = self.grid.quantize(time);
        self.tracks.get_mut(axis).insert(Keypoint {
            id,
            time,
            value,
            easing: Easing::Linear,
        });
        tracing::debug!(%axis, %id, time, value, "keypoint added");
        id
    }

    /// Remove a keypoint; `None` if the id is unknown
    pub fn delete_keypoint(&mut self, axis: Axis, id: KeypointId) -> Option<Keypoint> {
        let removed = self.tracks.get_mut(axis).remove(id);
        if removed.is_some() {
            tracing::debug!(%axis, %id, "keypoint deleted");
        }
        removed
    }

    /// Move a keypoint in time; returns the quantized time actually stored
    pub fn retime_keypoint(&mut self, axis: Axis, id: KeypointId, raw_time: f32) -> Option<f32> {
        let time = self.grid.quantize(raw_time);
        let track = self.tracks.get_mut(axis);
        let keypoint = track.get_mut(id)?;
        keypoint.time = time;
        track.sort();
        tracing::debug!(%axis, %id, time, "keypoint retimed");
        Some(time)
    }

    /// Switch a keypoint to a named preset, discarding any custom curve
    pub fn set_easing_preset(&mut self, axis: Axis, id: KeypointId, name: &str) -> bool {
        self.set_easing(axis, id, Easing::from_name(name))
    }

    /// Give a keypoint a custom Bezier easing
    pub fn set_custom_easing(&mut self, axis: Axis, id: KeypointId, curve: EasingCurve) -> bool {
        self.set_easing(axis, id, Easing::Custom(curve))
    }

    /// Replace a keypoint's easing
    pub fn set_easing(&mut self, axis: Axis, id: KeypointId, easing: Easing) -> bool {
        match self.tracks.get_mut(axis).get_mut(id) {
            Some(keypoint) => {
                keypoint.easing = easing;
                tracing::debug!(%axis, %id, easing = easing.label(), "easing changed");
                true
            }
            None => false,
        }
    }

    /// Restore invariants after deserialization: sorted tracks, ids past
    /// every existing keypoint, quantized non-negative times.
    pub fn normalize(&mut self) {
        for axis in Axis::ALL {
            let track = self.tracks.get_mut(axis);
            for keypoint in track.keypoints.iter_mut() {
                keypoint.time = self.grid.quantize(keypoint.time);
                self.ids.observe(keypoint.id);
            }
            track.sort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_rules() {
        let grid = TimeGrid::default();
        assert_eq!(grid.quantize(0.07), 0.0);
        assert_eq!(grid.quantize(-3.0), 0.0);
        assert_eq!(grid.quantize(0.31), 0.4);
        assert_eq!(grid.quantize(0.59), 0.6);
        assert_eq!(grid.quantize(1.29), 1.2);
        assert_eq!(grid.quantize(f32::NAN), 0.0);
    }

    #[test]
    fn test_quantize_huge_time_stays_finite() {
        let grid = TimeGrid::default();
        assert_eq!(grid.quantize(1e38), MAX_TIME);
        assert_eq!(grid.quantize(f32::MAX), MAX_TIME);
        assert_eq!(grid.quantize(1000.13), 1000.2);

        let mut store = KeypointStore::new();
        let id = store.add_keypoint(Axis::Z, 1e38, 45.0);
        assert_eq!(store.get(Axis::Z, id).map(|kp| kp.time), Some(MAX_TIME));
    }

    #[test]
    fn test_add_sorts_and_assigns_ids() {
        let mut store = KeypointStore::new();
        let late = store.add_keypoint(Axis::X, 2.0, 90.0);
        let early = store.add_keypoint(Axis::X, 0.0, 0.0);

        let track = store.track(Axis::X);
        assert_eq!(track.keypoints()[0].id, early);
        assert_eq!(track.keypoints()[1].id, late);
        assert_ne!(early, late);
        assert_eq!(track.keypoints()[0].easing, Easing::Linear);
        assert!(store.track(Axis::Y).is_empty());
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut store = KeypointStore::new();
        let a = store.add_keypoint(Axis::Z, 0.0, 1.0);
        store.delete_keypoint(Axis::Z, a);
        let b = store.add_keypoint(Axis::Z, 0.0, 1.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut store = KeypointStore::new();
        let id = store.add_keypoint(Axis::X, 1.0, 10.0);
        let before = store.clone();

        assert!(store.delete_keypoint(Axis::Y, id).is_none());
        assert!(store.retime_keypoint(Axis::Y, id, 3.0).is_none());
        assert!(!store.set_easing_preset(Axis::Z, id, "ease-in"));
        assert!(!store.set_custom_easing(Axis::Y, KeypointId(99), EasingCurve::default()));
        assert_eq!(store, before);
    }

    #[test]
    fn test_retime_resorts() {
        let mut store = KeypointStore::new();
        let a = store.add_keypoint(Axis::Y, 0.0, 0.0);
        let b = store.add_keypoint(Axis::Y, 1.0, 10.0);

        assert_eq!(store.retime_keypoint(Axis::Y, a, 1.93), Some(2.0));
        let order: Vec<_> = store.track(Axis::Y).keypoints().iter().map(|kp| kp.id).collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn test_preset_clears_custom_curve() {
        let mut store = KeypointStore::new();
        let id = store.add_keypoint(Axis::X, 1.0, 45.0);
        assert!(store.set_custom_easing(Axis::X, id, EasingCurve::default()));
        assert!(store.get(Axis::X, id).unwrap().easing.is_custom());

        assert!(store.set_easing_preset(Axis::X, id, "ease-out"));
        let easing = store.get(Axis::X, id).unwrap().easing;
        assert_eq!(easing, Easing::EaseOut);
        assert!(easing.curve().is_none());
    }

    #[test]
    fn test_duplicate_times_keep_insertion_order() {
        let mut store = KeypointStore::new();
        let first = store.add_keypoint(Axis::X, 1.0, 10.0);
        let second = store.add_keypoint(Axis::X, 1.0, 20.0);
        let ids: Vec<_> = store.track(Axis::X).keypoints().iter().map(|kp| kp.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_trackset_aggregates() {
        let mut store = KeypointStore::new();
        assert_eq!(store.tracks().max_time(), None);
        store.add_keypoint(Axis::X, 1.0, 0.0);
        store.add_keypoint(Axis::Z, 3.4, 0.0);
        assert_eq!(store.total_keypoints(), 2);
        assert_eq!(store.tracks().max_time(), Some(3.4));
    }

    #[test]
    fn test_normalize_after_load() {
        let json = r#"{
            "tracks": {
                "x": [
                    {"id": 5, "time": 2.0, "value": 90.0},
                    {"id": 2, "time": 0.0, "value": 0.0, "easing": "ease-in"}
                ]
            }
        }"#;
        let mut store: KeypointStore = serde_json::from_str(json).unwrap();
        store.normalize();

        let times: Vec<_> = store.track(Axis::X).keypoints().iter().map(|kp| kp.time).collect();
        assert_eq!(times, vec![0.0, 2.0]);
        let fresh = store.add_keypoint(Axis::Y, 0.0, 0.0);
        assert_eq!(fresh, KeypointId(6));
    }
}
