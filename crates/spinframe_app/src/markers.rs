//! Timeline marker views
//!
//! Read-only projections of a track for rendering: one marker per keypoint at
//! its normalized timeline position, and one segment per adjacent pair styled
//! by the easing of the keypoint it arrives at.

use serde::Serialize;
use spinframe_animation::{Easing, Timeline, Track};
use spinframe_core::{Axis, KeypointId, Selection};

/// Line style of the segment leading into a keypoint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentStyle {
    Solid,
    Dotted,
    Dashed,
    Double,
}

impl SegmentStyle {
    pub fn from_easing(easing: &Easing) -> Self {
        match easing {
            Easing::Linear | Easing::Custom(_) => SegmentStyle::Solid,
            Easing::EaseIn => SegmentStyle::Dotted,
            Easing::EaseOut => SegmentStyle::Dashed,
            Easing::EaseInOut => SegmentStyle::Double,
        }
    }

    /// CSS `border-style` keyword
    pub fn css_border_style(&self) -> &'static str {
        match self {
            SegmentStyle::Solid => "solid",
            SegmentStyle::Dotted => "dotted",
            SegmentStyle::Dashed => "dashed",
            SegmentStyle::Double => "double",
        }
    }
}

/// Connector between two adjacent markers, in normalized positions
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SegmentView {
    pub start: f32,
    pub end: f32,
    pub style: SegmentStyle,
}

/// One keypoint as drawn on the timeline
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkerView {
    pub id: KeypointId,
    pub time: f32,
    /// `time / duration`
    pub position: f32,
    pub easing_label: &'static str,
    pub tooltip: String,
    pub selected: bool,
    /// Segment arriving at this marker; `None` for the first keypoint
    pub segment: Option<SegmentView>,
}

/// Build the marker list of one track
pub fn marker_views(
    axis: Axis,
    track: &Track,
    timeline: &Timeline,
    selection: Option<Selection>,
) -> Vec<MarkerView> {
    let mut previous: Option<f32> = None;
    track
        .keypoints()
        .iter()
        .map(|keypoint| {
            let position = timeline.position_of(keypoint.time);
            let segment = previous.map(|start| SegmentView {
                start,
                end: position,
                style: SegmentStyle::from_easing(&keypoint.easing),
            });
            previous = Some(position);

            MarkerView {
                id: keypoint.id,
                time: keypoint.time,
                position,
                easing_label: keypoint.easing.label(),
                tooltip: format!("Easing: {}", keypoint.easing.label()),
                selected: selection == Some(Selection::new(axis, keypoint.id)),
                segment,
            }
        })
        .collect()
}
