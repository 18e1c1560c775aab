//! End-to-end scenarios for the keypoint store, sampling, playback and export
//!
//! These tests verify that:
//! - Sampling holds flat outside the keyed range and interpolates inside it
//! - Quantization and retiming leave already-snapped keypoints untouched
//! - Playback and export refuse too little content and agree with the preview

use spinframe_animation::{
    export_keyframes, sample_axis, sample_rotation, EasingCurve, KeypointStore, Playback,
    PlaybackFrame,
};
use spinframe_core::{Axis, EditorWarning, GuardedAction};

const EPS: f32 = 1e-4;

#[test]
fn test_three_point_linear_ramp() {
    let mut store = KeypointStore::new();
    for (time, value) in [(0.0, 0.0), (1.0, 45.0), (2.0, 90.0)] {
        store.add_keypoint(Axis::X, time, value);
    }

    let track = store.track(Axis::X);
    assert!((sample_axis(track, 0.5) - 22.5).abs() < EPS);
    assert!((sample_axis(track, 1.5) - 67.5).abs() < EPS);

    for time in [-5.0, -0.1, 0.0] {
        assert_eq!(sample_axis(track, time), 0.0);
    }
    for time in [2.0, 2.2, 50.0] {
        assert_eq!(sample_axis(track, time), 90.0);
    }
}

#[test]
fn test_retime_to_same_time_is_idempotent() {
    let mut store = KeypointStore::new();
    store.add_keypoint(Axis::Y, 0.0, 0.0);
    let id = store.add_keypoint(Axis::Y, 1.37, 80.0);
    let stored = store.get(Axis::Y, id).unwrap().time;
    assert_eq!(stored, 1.4);

    let samples_before: Vec<f32> = (0..=20)
        .map(|i| sample_axis(store.track(Axis::Y), i as f32 * 0.1))
        .collect();

    assert_eq!(store.retime_keypoint(Axis::Y, id, stored), Some(stored));

    let samples_after: Vec<f32> = (0..=20)
        .map(|i| sample_axis(store.track(Axis::Y), i as f32 * 0.1))
        .collect();
    assert_eq!(samples_before, samples_after);
}

#[test]
fn test_quantization_on_add() {
    let mut store = KeypointStore::new();
    let near_zero = store.add_keypoint(Axis::Z, 0.07, 5.0);
    let rounded = store.add_keypoint(Axis::Z, 0.31, 5.0);
    assert_eq!(store.get(Axis::Z, near_zero).unwrap().time, 0.0);
    assert_eq!(store.get(Axis::Z, rounded).unwrap().time, 0.4);
}

#[test]
fn test_single_keypoint_refuses_play_and_reports_count() {
    let mut store = KeypointStore::new();
    store.add_keypoint(Axis::X, 0.0, 10.0);

    let mut playback = Playback::new();
    match playback.start(store.tracks()) {
        Err(EditorWarning::NotEnoughKeypoints { action, found }) => {
            assert_eq!(action, GuardedAction::Play);
            assert_eq!(found, 1);
        }
        other => panic!("expected a warning, got {:?}", other),
    }
}

#[test]
fn test_export_matches_live_preview() {
    let mut store = KeypointStore::new();
    store.add_keypoint(Axis::X, 0.0, 0.0);
    let x_end = store.add_keypoint(Axis::X, 3.0, 180.0);
    store.set_custom_easing(Axis::X, x_end, EasingCurve::from_coords(0.1, 0.8, 0.3, 1.0));
    store.add_keypoint(Axis::Y, 1.2, -30.0);
    let y_end = store.add_keypoint(Axis::Y, 2.4, 30.0);
    store.set_easing_preset(Axis::Y, y_end, "ease-in-out");

    let export = export_keyframes(store.tracks());
    assert_eq!(export.duration, 3.0);
    assert_eq!(export.steps.len(), 4);

    for step in &export.steps {
        assert_eq!(step.rotation, sample_rotation(store.tracks(), step.time));
        assert!((step.percentage - step.time / 3.0 * 100.0).abs() < EPS);
    }
}

#[test]
fn test_playback_ends_on_last_keyframe_values() {
    let mut store = KeypointStore::new();
    store.add_keypoint(Axis::X, 0.0, 0.0);
    store.add_keypoint(Axis::X, 1.0, 33.0);
    store.add_keypoint(Axis::Z, 0.6, 12.0);

    let mut playback = Playback::new();
    let token = playback.start(store.tracks()).unwrap();

    // Jittery 60 Hz-ish frame times
    let mut last = None;
    for elapsed in [0.0, 0.017, 0.031, 0.52, 0.9, 1.013] {
        if let Some(frame) = playback.tick(token, elapsed, store.tracks()) {
            last = Some(frame);
        }
    }

    match last {
        Some(PlaybackFrame::Finished { duration, rotation }) => {
            assert_eq!(duration, 1.0);
            assert_eq!(rotation.x, 33.0);
            assert_eq!(rotation.z, 12.0);
        }
        other => panic!("expected terminal frame, got {:?}", other),
    }
}
