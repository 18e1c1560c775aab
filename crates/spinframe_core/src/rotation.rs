//! Rotation axes and the sampled rotation triple

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three rotation axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in track order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Lowercase axis name (`x`, `y`, `z`)
    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// Parse an axis name, case-insensitive
    pub fn from_name(name: &str) -> Option<Axis> {
        match name.trim().to_ascii_lowercase().as_str() {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            _ => None,
        }
    }

    /// CSS transform function rotating around this axis
    pub fn css_function(&self) -> &'static str {
        match self {
            Axis::X => "rotateX",
            Axis::Y => "rotateY",
            Axis::Z => "rotateZ",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rotation angles in degrees, one per axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub const ZERO: Rotation = Rotation {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Angle for one axis
    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Set the angle for one axis
    pub fn set(&mut self, axis: Axis, degrees: f32) {
        match axis {
            Axis::X => self.x = degrees,
            Axis::Y => self.y = degrees,
            Axis::Z => self.z = degrees,
        }
    }

    /// Builder: set one axis
    pub fn with(mut self, axis: Axis, degrees: f32) -> Self {
        self.set(axis, degrees);
        self
    }

    /// CSS `transform` value, e.g. `rotateX(10deg) rotateY(0deg) rotateZ(-5deg)`
    pub fn to_css_transform(&self) -> String {
        Axis::ALL
            .iter()
            .map(|axis| {
                format!(
                    "{}({}deg)",
                    axis.css_function(),
                    format_css_number(self.get(*axis))
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Format a number for CSS output in its shortest stable form.
///
/// At most four fractional digits, trailing zeros trimmed, `-0` printed as `0`.
/// Non-finite values print as `0` so generated stylesheets stay valid.
pub fn format_css_number(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let mut text = format!("{:.4}", value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.');
        text = trimmed.to_string();
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}
