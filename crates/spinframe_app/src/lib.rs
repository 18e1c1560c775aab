//! spinframe editor
//!
//! The headless rotation keyframe editor built on the animation engine:
//!
//! - **Editor state**: commands in, queries and events out
//! - **Curve editor**: handle hit-testing and dragging on a padded canvas
//! - **Markers**: per-track marker and segment views for the timeline
//! - **Document export**: a standalone HTML page playing the animation
//! - **Projects**: JSON persistence of the keypoint tracks

pub mod curve_editor;
pub mod document;
pub mod editor;
pub mod markers;
pub mod project;

pub use curve_editor::{CanvasGeometry, CurveEditor};
pub use document::DocumentTemplate;
pub use editor::{EditorCommand, EditorSettings, EditorState, CURVE_SEGMENTS};
pub use markers::{marker_views, MarkerView, SegmentStyle, SegmentView};
pub use project::{load_project, save_project, PROJECT_VERSION};
