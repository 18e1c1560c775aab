//! Timeline duration policy
//!
//! The visible timeline is at least as long as its floor and never shorter
//! than [`MINIMUM_DURATION`]; it grows to fit the furthest keypoint.
//! Marker and playhead positions are derived from it as `time / duration`.

use crate::keypoint::{TimeGrid, TrackSet};
use serde::{Deserialize, Serialize};

/// Absolute lower bound for the timeline length (seconds)
pub const MINIMUM_DURATION: f32 = 2.0;

/// Timeline length before any keypoint exists (seconds)
pub const INITIAL_DURATION: f32 = 10.0;

/// Upper bound on the number of tick labels
pub const MAX_TICKS: usize = 201;

/// Timeline configuration (the `[timeline]` config section)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Length of an empty timeline; also the floor the timeline never shrinks below
    pub initial_length: f32,
    /// Grid spacing for keypoint and playhead times
    pub snap_step: f32,
    /// Times below this snap to zero
    pub snap_to_zero: f32,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            initial_length: INITIAL_DURATION,
            snap_step: 0.2,
            snap_to_zero: 0.1,
        }
    }
}

impl TimelineSettings {
    pub fn grid(&self) -> TimeGrid {
        TimeGrid {
            step: self.snap_step,
            snap_to_zero: self.snap_to_zero,
        }
    }
}

/// `max(floor, furthest keypoint time, MINIMUM_DURATION)`
pub fn recompute_duration(tracks: &TrackSet, floor: f32) -> f32 {
    let content = tracks.max_time().unwrap_or(0.0);
    floor.max(content).max(MINIMUM_DURATION)
}

/// Furthest keypoint time, `0.0` for an empty set (no padding applied)
pub fn content_duration(tracks: &TrackSet) -> f32 {
    tracks.max_time().unwrap_or(0.0)
}

/// Normalized `[0, 1]` position of a time on a timeline of `duration`
pub fn normalized_position(time: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 0.0;
    }
    (time / duration).clamp(0.0, 1.0)
}

/// A tick label under the timeline
#[derive(Clone, Debug, PartialEq)]
pub struct TickLabel {
    pub time: f32,
    /// Normalized position
    pub position: f32,
    pub text: String,
}

/// Derived timeline state
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    settings: TimelineSettings,
    duration: f32,
}

impl Timeline {
    pub fn new(settings: TimelineSettings) -> Self {
        Self {
            settings,
            duration: settings.initial_length.max(MINIMUM_DURATION),
        }
    }

    pub fn settings(&self) -> &TimelineSettings {
        &self.settings
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Re-derive the duration from the tracks; returns `true` if it changed
    pub fn recompute(&mut self, tracks: &TrackSet) -> bool {
        let duration = recompute_duration(tracks, self.settings.initial_length);
        let changed = duration != self.duration;
        if changed {
            tracing::debug!(from = self.duration, to = duration, "timeline duration changed");
        }
        self.duration = duration;
        changed
    }

    /// Normalized position of `time`
    pub fn position_of(&self, time: f32) -> f32 {
        normalized_position(time, self.duration)
    }

    /// Time under a normalized position (clamped to the timeline)
    pub fn time_at(&self, position: f32) -> f32 {
        position.clamp(0.0, 1.0) * self.duration
    }

    /// Tick labels every grid step from 0 to the duration.
    ///
    /// Long timelines widen the stride to a whole number of grid steps so no
    /// more than [`MAX_TICKS`] labels are produced.
    pub fn labels(&self) -> Vec<TickLabel> {
        let step = self.settings.snap_step;
        if step <= 0.0 || !self.duration.is_finite() {
            return Vec::new();
        }

        // Count steps instead of accumulating floats so the last tick is not lost
        let count = (self.duration / step + 1e-3).floor() as usize;
        let stride = count.div_ceil(MAX_TICKS - 1).max(1);
        (0..=count / stride)
            .map(|i| {
                let time = (i * stride) as f32 * step;
                TickLabel {
                    time,
                    position: self.position_of(time),
                    text: format!("{:.1}", time),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypoint::{KeypointStore, MAX_TIME};
    use spinframe_core::Axis;

    #[test]
    fn test_recompute_duration() {
        let mut store = KeypointStore::new();
        assert_eq!(recompute_duration(store.tracks(), 0.0), MINIMUM_DURATION);
        assert_eq!(recompute_duration(store.tracks(), 10.0), 10.0);

        store.add_keypoint(Axis::Y, 14.2, 0.0);
        assert_eq!(recompute_duration(store.tracks(), 10.0), 14.2);
        assert_eq!(content_duration(store.tracks()), 14.2);
    }

    #[test]
    fn test_timeline_grows_and_shrinks_back_to_floor() {
        let mut store = KeypointStore::new();
        let mut timeline = Timeline::new(TimelineSettings::default());
        assert_eq!(timeline.duration(), INITIAL_DURATION);

        let id = store.add_keypoint(Axis::X, 12.0, 0.0);
        assert!(timeline.recompute(store.tracks()));
        assert_eq!(timeline.duration(), 12.0);

        store.delete_keypoint(Axis::X, id);
        assert!(timeline.recompute(store.tracks()));
        assert_eq!(timeline.duration(), INITIAL_DURATION);
        assert!(!timeline.recompute(store.tracks()));
    }

    #[test]
    fn test_positions() {
        let timeline = Timeline::new(TimelineSettings::default());
        assert_eq!(timeline.position_of(2.5), 0.25);
        assert_eq!(timeline.position_of(20.0), 1.0);
        assert_eq!(timeline.time_at(0.5), 5.0);
        assert_eq!(normalized_position(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_labels_cover_whole_timeline() {
        let timeline = Timeline::new(TimelineSettings {
            initial_length: 2.0,
            ..TimelineSettings::default()
        });
        let labels = timeline.labels();
        assert_eq!(labels.len(), 11);
        assert_eq!(labels[0].text, "0.0");
        assert_eq!(labels[3].text, "0.6");
        assert_eq!(labels[10].text, "2.0");
        assert_eq!(labels[10].position, 1.0);
    }

    #[test]
    fn test_labels_thin_out_on_long_timelines() {
        let mut store = KeypointStore::new();
        store.add_keypoint(Axis::X, 1e38, 90.0);
        let mut timeline = Timeline::new(TimelineSettings::default());
        timeline.recompute(store.tracks());
        assert_eq!(timeline.duration(), MAX_TIME);

        let labels = timeline.labels();
        assert!(labels.len() <= MAX_TICKS);
        assert!(labels.len() > MAX_TICKS / 2);
        assert_eq!(labels[0].time, 0.0);
        let last = labels[labels.len() - 1].time;
        assert!(last <= MAX_TIME && MAX_TIME - last < MAX_TIME / 100.0);
        assert!(labels.windows(2).all(|pair| pair[0].time < pair[1].time));
    }
}
