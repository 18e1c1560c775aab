//! Editor warnings
//!
//! Nothing in the editor core is fatal. Refused actions are reported as
//! warnings and leave the editor state untouched.

use std::fmt;
use thiserror::Error;

/// Actions that require a minimum amount of animation content
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardedAction {
    Play,
    Export,
}

impl fmt::Display for GuardedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardedAction::Play => f.write_str("play the animation"),
            GuardedAction::Export => f.write_str("export the animation"),
        }
    }
}

/// User-visible, non-fatal editor warnings
#[derive(Error, Clone, Debug, PartialEq)]
pub enum EditorWarning {
    /// Play or export needs at least two keypoints across all axes
    #[error("add at least two keypoints to {action} (found {found})")]
    NotEnoughKeypoints { action: GuardedAction, found: usize },
}

impl EditorWarning {
    /// Keypoints required before playback or export is allowed
    pub const MIN_KEYPOINTS: usize = 2;

    /// Check the keypoint count for a guarded action
    pub fn require_keypoints(action: GuardedAction, found: usize) -> Result<(), EditorWarning> {
        if found < Self::MIN_KEYPOINTS {
            tracing::warn!(%action, found, "not enough keypoints");
            return Err(EditorWarning::NotEnoughKeypoints { action, found });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_two_keypoints() {
        assert!(EditorWarning::require_keypoints(GuardedAction::Play, 2).is_ok());
        assert_eq!(
            EditorWarning::require_keypoints(GuardedAction::Export, 1),
            Err(EditorWarning::NotEnoughKeypoints {
                action: GuardedAction::Export,
                found: 1
            })
        );
    }

    #[test]
    fn test_warning_message() {
        let warning = EditorWarning::NotEnoughKeypoints {
            action: GuardedAction::Play,
            found: 0,
        };
        assert_eq!(
            warning.to_string(),
            "add at least two keypoints to play the animation (found 0)"
        );
    }
}
