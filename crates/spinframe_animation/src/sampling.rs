//! Time to rotation sampling
//!
//! Values hold flat before the first and after the last keypoint. Between
//! two keypoints the segment easing comes from the *arriving* keypoint.

use crate::keypoint::{Track, TrackSet};
use spinframe_core::{Axis, Rotation};

/// Sample one axis at `time` (seconds)
pub fn sample_axis(track: &Track, time: f32) -> f32 {
    let keypoints = track.keypoints();
    let (Some(first), Some(last)) = (keypoints.first(), keypoints.last()) else {
        return 0.0;
    };

    if time <= first.time {
        return first.value;
    }
    if time >= last.time {
        return last.value;
    }

    // First matching pair wins when several keypoints share a time
    for pair in keypoints.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if current.time <= time && time <= next.time {
            let span = next.time - current.time;
            if span <= f32::EPSILON {
                return next.value;
            }

            let t = (time - current.time) / span;
            let eased = next.easing.apply(t);
            return current.value + (next.value - current.value) * eased;
        }
    }

    // Only reachable for NaN input
    first.value
}

/// Sample all three axes at `time`
pub fn sample_rotation(tracks: &TrackSet, time: f32) -> Rotation {
    let mut rotation = Rotation::ZERO;
    for axis in Axis::ALL {
        rotation.set(axis, sample_axis(tracks.get(axis), time));
    }
    rotation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::{Easing, EasingCurve};
    use crate::keypoint::KeypointStore;

    const EPS: f32 = 1e-4;

    fn ramp() -> KeypointStore {
        let mut store = KeypointStore::new();
        store.add_keypoint(Axis::X, 0.0, 0.0);
        store.add_keypoint(Axis::X, 1.0, 45.0);
        store.add_keypoint(Axis::X, 2.0, 90.0);
        store
    }

    #[test]
    fn test_empty_track_is_zero() {
        let store = KeypointStore::new();
        for time in [0.0, 1.5, 100.0] {
            assert_eq!(sample_axis(store.track(Axis::Y), time), 0.0);
        }
    }

    #[test]
    fn test_linear_ramp() {
        let store = ramp();
        let track = store.track(Axis::X);
        assert!((sample_axis(track, 0.5) - 22.5).abs() < EPS);
        assert!((sample_axis(track, 1.5) - 67.5).abs() < EPS);
        assert!((sample_axis(track, 1.0) - 45.0).abs() < EPS);
    }

    #[test]
    fn test_flat_extrapolation() {
        let mut store = KeypointStore::new();
        store.add_keypoint(Axis::Z, 0.4, -15.0);
        store.add_keypoint(Axis::Z, 1.0, 30.0);
        let track = store.track(Axis::Z);

        assert_eq!(sample_axis(track, 0.0), -15.0);
        assert_eq!(sample_axis(track, -1.0), -15.0);
        assert_eq!(sample_axis(track, 1.0), 30.0);
        assert_eq!(sample_axis(track, 9.0), 30.0);
    }

    #[test]
    fn test_single_keypoint_is_constant() {
        let mut store = KeypointStore::new();
        store.add_keypoint(Axis::X, 0.0, 10.0);
        for time in [0.0, 0.5, 4.0] {
            assert_eq!(sample_axis(store.track(Axis::X), time), 10.0);
        }
    }

    #[test]
    fn test_arriving_keypoint_owns_easing() {
        let mut store = KeypointStore::new();
        let start = store.add_keypoint(Axis::X, 0.0, 0.0);
        let end = store.add_keypoint(Axis::X, 1.0, 100.0);

        // Easing on the departing keypoint has no effect on this segment
        store.set_easing(Axis::X, start, Easing::EaseIn);
        assert!((sample_axis(store.track(Axis::X), 0.6) - 60.0).abs() < EPS);

        store.set_easing(Axis::X, end, Easing::EaseIn);
        assert!((sample_axis(store.track(Axis::X), 0.6) - 36.0).abs() < EPS);
    }

    #[test]
    fn test_custom_curve_segment() {
        let mut store = KeypointStore::new();
        store.add_keypoint(Axis::Y, 0.0, 0.0);
        let end = store.add_keypoint(Axis::Y, 2.0, 10.0);
        let curve = EasingCurve::from_coords(0.42, 0.0, 0.58, 1.0);
        store.set_custom_easing(Axis::Y, end, curve);

        let expected = 10.0 * curve.apply(0.25);
        assert!((sample_axis(store.track(Axis::Y), 0.5) - expected).abs() < EPS);
    }

    #[test]
    fn test_duplicate_times_take_first_pair() {
        let mut store = KeypointStore::new();
        store.add_keypoint(Axis::X, 0.0, 0.0);
        store.add_keypoint(Axis::X, 1.0, 10.0);
        store.add_keypoint(Axis::X, 1.0, 50.0);
        store.add_keypoint(Axis::X, 2.0, 60.0);
        let track = store.track(Axis::X);

        // The pair (0, first 1.0) matches first
        assert!((sample_axis(track, 1.0) - 10.0).abs() < EPS);
        // After the shared time the second duplicate starts the segment
        assert!((sample_axis(track, 1.5) - 55.0).abs() < EPS);
        assert!(sample_axis(track, 1.0).is_finite());
    }

    #[test]
    fn test_sample_rotation_is_per_axis() {
        let mut store = ramp();
        store.add_keypoint(Axis::Z, 0.0, 360.0);
        let rotation = sample_rotation(store.tracks(), 0.5);
        assert!((rotation.x - 22.5).abs() < EPS);
        assert_eq!(rotation.y, 0.0);
        assert_eq!(rotation.z, 360.0);
    }
}
