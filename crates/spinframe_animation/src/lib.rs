//! spinframe animation engine
//!
//! Keypoint tracks for a three-axis rotation and everything computed from them.
//!
//! # Features
//!
//! - **Easing**: the four named presets plus two-pass cubic Bezier curves
//! - **Keypoint store**: per-axis tracks kept sorted, with time quantization
//! - **Sampling**: time to rotation, easing resolved from the arriving keypoint
//! - **Timeline**: duration policy, marker positions and tick labels
//! - **Playback**: frame-driven ticks with cancellation tokens
//! - **Export**: baking the sampled curve into a CSS `@keyframes` rule

pub mod easing;
pub mod export;
pub mod keypoint;
pub mod sampling;
pub mod scheduler;
pub mod timeline;

pub use easing::{cubic_bezier, evaluate_named, ControlPoint, Easing, EasingCurve};
pub use export::{export_keyframes, CssRules, KeyframeExport, KeyframeStep, ANIMATION_NAME};
pub use keypoint::{Keypoint, KeypointStore, TimeGrid, Track, TrackSet, MAX_TIME};
pub use sampling::{sample_axis, sample_rotation};
pub use scheduler::{FrameToken, Playback, PlaybackFrame};
pub use timeline::{
    content_duration, normalized_position, recompute_duration, TickLabel, Timeline,
    TimelineSettings, INITIAL_DURATION, MAX_TICKS, MINIMUM_DURATION,
};
