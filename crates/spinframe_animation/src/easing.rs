//! Easing functions for keypoint segments
//!
//! Named presets use fixed polynomial formulas. Custom curves are cubic
//! Beziers with fixed endpoints `(0, 0)` and `(1, 1)`, evaluated in two
//! passes: the x coordinates warp the progress `t` into `u`, then the y
//! coordinates are evaluated at `u`. This is not a true inversion of the
//! curve; the live preview and the export both rely on exactly this shape.

use serde::{Deserialize, Serialize};

/// Names accepted by [`Easing::from_name`] for the presets
pub const PRESET_NAMES: [&str; 4] = ["linear", "ease-in", "ease-out", "ease-in-out"];

/// Easing applied to the segment arriving at a keypoint
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Custom(EasingCurve),
}

impl Easing {
    /// Parse a preset name. Unknown names (including `custom` without a
    /// curve) fall back to linear.
    pub fn from_name(name: &str) -> Self {
        match name {
            "linear" => Easing::Linear,
            "ease-in" => Easing::EaseIn,
            "ease-out" => Easing::EaseOut,
            "ease-in-out" => Easing::EaseInOut,
            other => {
                tracing::debug!(name = other, "unknown easing, using linear");
                Easing::Linear
            }
        }
    }

    /// Label shown in the UI (`linear`, ..., `custom`)
    pub fn label(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
            Easing::Custom(_) => "custom",
        }
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::Custom(curve) => curve.apply(t),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Easing::Custom(_))
    }

    /// The custom curve, if any
    pub fn curve(&self) -> Option<&EasingCurve> {
        match self {
            Easing::Custom(curve) => Some(curve),
            _ => None,
        }
    }

    /// Control points shown in the curve editor for this easing.
    ///
    /// Presets map to their CSS timing-function equivalents; a custom easing
    /// returns its own curve.
    pub fn editor_curve(&self) -> EasingCurve {
        match self {
            Easing::Linear => EasingCurve::from_coords(0.0, 0.0, 1.0, 1.0),
            Easing::EaseIn => EasingCurve::from_coords(0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => EasingCurve::from_coords(0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => EasingCurve::from_coords(0.42, 0.0, 0.58, 1.0),
            Easing::Custom(curve) => *curve,
        }
    }
}

/// Evaluate a named easing; unknown names behave like `linear`
pub fn evaluate_named(name: &str, t: f32) -> f32 {
    Easing::from_name(name).apply(t)
}

/// A 2D control point of an easing curve
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f32,
    pub y: f32,
}

impl ControlPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates into `[0, 1]`
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }
}

/// Custom easing curve: a cubic Bezier from `(0, 0)` to `(1, 1)`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EasingCurve {
    pub p1: ControlPoint,
    pub p2: ControlPoint,
}

impl Default for EasingCurve {
    /// Neutral handles used when no better default is known
    fn default() -> Self {
        Self::from_coords(0.25, 0.25, 0.75, 0.75)
    }
}

impl EasingCurve {
    pub fn new(p1: ControlPoint, p2: ControlPoint) -> Self {
        Self { p1, p2 }
    }

    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(ControlPoint::new(x1, y1), ControlPoint::new(x2, y2))
    }

    /// Both handles, in order
    pub fn handles(&self) -> [ControlPoint; 2] {
        [self.p1, self.p2]
    }

    /// Copy with one handle replaced. Indices other than 0 and 1 are ignored.
    pub fn with_handle(mut self, index: usize, point: ControlPoint) -> Self {
        match index {
            0 => self.p1 = point,
            1 => self.p2 = point,
            _ => {}
        }
        self
    }

    /// Two-pass evaluation: warp `t` through the x polynomial, then read y
    pub fn apply(&self, t: f32) -> f32 {
        let u = cubic_bezier(t, 0.0, self.p1.x, self.p2.x, 1.0);
        cubic_bezier(u, 0.0, self.p1.y, self.p2.y, 1.0)
    }

    /// Point on the curve at parameter `t`, for drawing
    pub fn point_at(&self, t: f32) -> ControlPoint {
        ControlPoint::new(
            cubic_bezier(t, 0.0, self.p1.x, self.p2.x, 1.0),
            cubic_bezier(t, 0.0, self.p1.y, self.p2.y, 1.0),
        )
    }

    /// Polyline approximating the curve with `segments` straight pieces
    pub fn polyline(&self, segments: usize) -> Vec<ControlPoint> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }
}

/// Single-axis cubic Bezier:
/// `(1-t)³p0 + 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³p3`
#[inline]
pub fn cubic_bezier(t: f32, p0: f32, p1: f32, p2: f32, p3: f32) -> f32 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
}
