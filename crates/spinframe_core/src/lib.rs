//! spinframe core
//!
//! Shared primitives for the rotation keyframe editor:
//!
//! - **Axes and rotations**: the X/Y/Z rotation triple and its CSS transform form
//! - **Keypoint ids**: opaque, monotonically allocated, never reused
//! - **Drag gestures**: press / move / release sessions that always release
//! - **Editor events**: notifications for UI adapters plus a dispatcher
//!
//! # Example
//!
//! ```rust
//! use spinframe_core::{Axis, Rotation};
//!
//! let mut rotation = Rotation::ZERO;
//! rotation.set(Axis::Y, 45.0);
//! assert_eq!(rotation.to_css_transform(), "rotateX(0deg) rotateY(45deg) rotateZ(0deg)");
//! ```

pub mod error;
pub mod events;
pub mod gesture;
pub mod ids;
pub mod rotation;

pub use error::{EditorWarning, GuardedAction};
pub use events::{EditorEvent, EventDispatcher, EventKind};
pub use gesture::{
    DragPhase, DragSession, DragTarget, GestureId, GestureRuntime, PointerInput, PointerPos,
};
pub use ids::{IdAllocator, KeypointId, Selection};
pub use rotation::{format_css_number, Axis, Rotation};
