//! Playback scheduling
//!
//! The host owns the frame loop (a render loop, a timer, or a test stepping
//! synthetic time) and calls [`Playback::tick`] with the elapsed time on each
//! frame. Ticks return a sampled rotation until the elapsed time reaches the
//! animation duration, then exactly one terminal frame sampled *at* the
//! duration, so the last frame always lands on the last keyframe's value.
//!
//! Every start hands out a fresh [`FrameToken`]. Stopping or restarting
//! invalidates older tokens; a tick with a stale token returns `None` and
//! samples nothing.

use crate::keypoint::TrackSet;
use crate::sampling::sample_rotation;
use crate::timeline::content_duration;
use spinframe_core::{EditorWarning, GuardedAction, Rotation};

/// Identifies one playback run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// Result of one playback tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaybackFrame {
    /// Playback continues; preview this rotation
    Continue { elapsed: f32, rotation: Rotation },
    /// Terminal frame sampled exactly at the duration; playback is over
    Finished { duration: f32, rotation: Rotation },
}

impl PlaybackFrame {
    pub fn rotation(&self) -> Rotation {
        match self {
            PlaybackFrame::Continue { rotation, .. } | PlaybackFrame::Finished { rotation, .. } => {
                *rotation
            }
        }
    }

    /// Playhead time for this frame
    pub fn time(&self) -> f32 {
        match self {
            PlaybackFrame::Continue { elapsed, .. } => *elapsed,
            PlaybackFrame::Finished { duration, .. } => *duration,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, PlaybackFrame::Finished { .. })
    }
}

#[derive(Clone, Copy, Debug)]
struct ActiveRun {
    token: FrameToken,
    duration: f32,
}

/// Frame-driven playback of the keypoint tracks
#[derive(Clone, Debug, Default)]
pub struct Playback {
    generation: u64,
    active: Option<ActiveRun>,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) playback.
    ///
    /// Refused with a warning when fewer than two keypoints exist across all
    /// axes; the previous run, if any, is left untouched in that case.
    pub fn start(&mut self, tracks: &TrackSet) -> Result<FrameToken, EditorWarning> {
        EditorWarning::require_keypoints(GuardedAction::Play, tracks.total_keypoints())?;

        self.generation += 1;
        let token = FrameToken(self.generation);
        let duration = content_duration(tracks);
        self.active = Some(ActiveRun { token, duration });
        tracing::debug!(duration, "playback started");
        Ok(token)
    }

    /// Stop playback, cancelling any pending frame. Returns `true` if a run was active.
    pub fn stop(&mut self) -> bool {
        let was_playing = self.active.take().is_some();
        if was_playing {
            tracing::debug!("playback stopped");
        }
        was_playing
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    /// Duration of the active run
    pub fn duration(&self) -> Option<f32> {
        self.active.map(|run| run.duration)
    }

    /// Token of the active run
    pub fn token(&self) -> Option<FrameToken> {
        self.active.map(|run| run.token)
    }

    /// Advance to `elapsed` seconds since start.
    ///
    /// Returns `None` when `token` does not belong to the active run
    /// (playback was stopped, restarted or already finished).
    pub fn tick(
        &mut self,
        token: FrameToken,
        elapsed: f32,
        tracks: &TrackSet,
    ) -> Option<PlaybackFrame> {
        let run = self.active.filter(|run| run.token == token)?;

        let elapsed = if elapsed.is_finite() {
            elapsed.max(0.0)
        } else {
            run.duration
        };

        if elapsed >= run.duration {
            self.active = None;
            tracing::debug!(duration = run.duration, "playback finished");
            return Some(PlaybackFrame::Finished {
                duration: run.duration,
                rotation: sample_rotation(tracks, run.duration),
            });
        }

        tracing::trace!(elapsed, "playback frame");
        Some(PlaybackFrame::Continue {
            elapsed,
            rotation: sample_rotation(tracks, elapsed),
        })
    }
}
