//! Easing curve editor state
//!
//! While a keypoint is selected the curve editor holds a *copy* of its curve:
//! the custom curve if it has one, otherwise the preset's default handles.
//! The copy is thrown away on selection change. Dragging a handle is the only
//! thing that writes back, and it promotes the keypoint to a custom easing.

use serde::{Deserialize, Serialize};
use spinframe_animation::{ControlPoint, Easing, EasingCurve};
use spinframe_core::{PointerPos, Selection};

/// Pixel geometry of the curve editor canvas
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasGeometry {
    pub width: f32,
    pub height: f32,
    /// Inset on every side so handles at the edges stay grabbable
    pub padding: f32,
    /// Hit radius around a handle
    pub handle_radius: f32,
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 200.0,
            padding: 10.0,
            handle_radius: 10.0,
        }
    }
}

impl CanvasGeometry {
    fn inner_width(&self) -> f32 {
        (self.width - self.padding * 2.0).max(1.0)
    }

    fn inner_height(&self) -> f32 {
        (self.height - self.padding * 2.0).max(1.0)
    }

    /// Canvas pixel for a curve-space point (y grows upwards in curve space)
    pub fn to_canvas(&self, point: ControlPoint) -> PointerPos {
        PointerPos::new(
            point.x * self.inner_width() + self.padding,
            (1.0 - point.y) * self.inner_height() + self.padding,
        )
    }

    /// Curve-space point under a canvas pixel, unclamped
    pub fn to_curve(&self, pos: PointerPos) -> ControlPoint {
        ControlPoint::new(
            (pos.x - self.padding) / self.inner_width(),
            1.0 - (pos.y - self.padding) / self.inner_height(),
        )
    }
}

/// Authoring copy of the selected keypoint's easing curve
#[derive(Clone, Debug, PartialEq)]
pub struct CurveEditor {
    selection: Selection,
    curve: EasingCurve,
    edited: bool,
}

impl CurveEditor {
    /// Open the editor for a keypoint with the given easing
    pub fn open(selection: Selection, easing: &Easing) -> Self {
        Self {
            selection,
            curve: easing.editor_curve(),
            edited: false,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn curve(&self) -> EasingCurve {
        self.curve
    }

    /// Handle positions for rendering
    pub fn handles(&self) -> [ControlPoint; 2] {
        self.curve.handles()
    }

    /// True once a handle was dragged since the editor opened
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    /// Show a different easing (after a preset change)
    pub fn reset_to(&mut self, easing: &Easing) {
        self.curve = easing.editor_curve();
        self.edited = false;
    }

    /// Index of the handle under a canvas pixel; the later handle wins on overlap
    pub fn hit_test(&self, pos: PointerPos, geometry: &CanvasGeometry) -> Option<usize> {
        self.handles()
            .iter()
            .enumerate()
            .rev()
            .find(|(_, handle)| {
                let center = geometry.to_canvas(**handle);
                (pos.x - center.x).hypot(pos.y - center.y) < geometry.handle_radius
            })
            .map(|(index, _)| index)
    }

    /// Move a handle to a canvas pixel, clamped to the unit square
    pub fn drag_handle(
        &mut self,
        index: usize,
        pos: PointerPos,
        geometry: &CanvasGeometry,
    ) -> Option<EasingCurve> {
        if index > 1 {
            return None;
        }
        let point = geometry.to_curve(pos).clamped();
        self.curve = self.curve.with_handle(index, point);
        self.edited = true;
        Some(self.curve)
    }

    /// Curve polyline in canvas pixels, for drawing
    pub fn polyline(&self, geometry: &CanvasGeometry, segments: usize) -> Vec<PointerPos> {
        self.curve
            .polyline(segments)
            .into_iter()
            .map(|point| geometry.to_canvas(point))
            .collect()
    }
}
