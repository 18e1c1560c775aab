//! CSS `@keyframes` export
//!
//! Bakes the sampled rotation curve into one keyframe step per distinct
//! keypoint time. Per-segment easing is already folded into the sampled
//! values, so the exported animation runs with a `linear` timing function.

use crate::keypoint::TrackSet;
use crate::sampling::sample_rotation;
use smallvec::SmallVec;
use spinframe_core::{format_css_number, Rotation};
use std::fmt;

/// Name of the generated `@keyframes` rule
pub const ANIMATION_NAME: &str = "rotateAnimation";

/// One baked keyframe
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyframeStep {
    /// Source time in seconds
    pub time: f32,
    /// Position in the animation, 0 to 100
    pub percentage: f32,
    pub rotation: Rotation,
}

/// A detached snapshot of the animation, ready to render as CSS
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeExport {
    /// Animation length in seconds (the furthest keypoint, no padding)
    pub duration: f32,
    pub steps: Vec<KeyframeStep>,
}

/// Sample the tracks at every distinct keypoint time.
///
/// With zero-length content (all keypoints at time 0) the export is a single
/// `0%` step instead of dividing by zero. Non-finite times are skipped.
pub fn export_keyframes(tracks: &TrackSet) -> KeyframeExport {
    let times = distinct_times(tracks);
    let duration = times.last().copied().unwrap_or(0.0).max(0.0);

    let steps: Vec<KeyframeStep> = if duration <= 0.0 {
        times
            .first()
            .map(|&time| KeyframeStep {
                time,
                percentage: 0.0,
                rotation: sample_rotation(tracks, time),
            })
            .into_iter()
            .collect()
    } else {
        times
            .iter()
            .map(|&time| KeyframeStep {
                time,
                percentage: time / duration * 100.0,
                rotation: sample_rotation(tracks, time),
            })
            .collect()
    };

    tracing::debug!(duration, steps = steps.len(), "keyframes exported");
    KeyframeExport { duration, steps }
}

/// Union of finite keypoint times across all tracks, ascending, without duplicates
fn distinct_times(tracks: &TrackSet) -> SmallVec<[f32; 16]> {
    let mut times: SmallVec<[f32; 16]> = tracks
        .keypoints()
        .map(|kp| kp.time)
        .filter(|time| time.is_finite())
        .collect();
    times.sort_by(|a, b| a.total_cmp(b));
    times.dedup();
    times
}

impl KeyframeExport {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Keyframes and animation rules under a custom name
    pub fn css<'a>(&'a self, name: &'a str) -> CssRules<'a> {
        CssRules { export: self, name }
    }

    pub fn to_css_named(&self, name: &str) -> String {
        self.css(name).to_string()
    }

    /// Keyframes and animation rules named [`ANIMATION_NAME`]
    pub fn to_css(&self) -> String {
        self.to_css_named(ANIMATION_NAME)
    }
}

impl fmt::Display for KeyframeExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css(ANIMATION_NAME))
    }
}

/// The `@keyframes` rule plus the rule binding it to `.animation-container`
pub struct CssRules<'a> {
    export: &'a KeyframeExport,
    name: &'a str,
}

impl fmt::Display for CssRules<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@keyframes {} {{", self.name)?;
        for step in &self.export.steps {
            writeln!(f, "{}% {{", format_css_number(step.percentage))?;
            writeln!(f, "transform: {};", step.rotation.to_css_transform())?;
            writeln!(f, "}}")?;
        }
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, ".animation-container {{")?;
        writeln!(
            f,
            "  animation: {} {}s linear forwards;",
            self.name,
            format_css_number(self.export.duration)
        )?;
        writeln!(f, "}}")
    }
}
