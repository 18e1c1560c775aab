//! Editor state and command interface
//!
//! [`EditorState`] owns everything the rotation editor knows: the keypoint
//! store, the timeline, the selection and its curve editor, the playhead, the
//! control values, playback and pointer drags. Hosts mutate it through
//! [`EditorState::apply`] (or the equivalent methods), read it back through
//! the query methods, and subscribe to [`EditorEvent`]s for redraws.
//!
//! # Example
//!
//! ```rust
//! use spinframe_app::{EditorCommand, EditorState};
//! use spinframe_core::Axis;
//!
//! let mut editor = EditorState::default();
//! editor.apply(EditorCommand::AddKeypointAt { axis: Axis::X, time: 0.0, value: 0.0 }).unwrap();
//! editor.apply(EditorCommand::AddKeypointAt { axis: Axis::X, time: 2.0, value: 90.0 }).unwrap();
//!
//! let css = editor.export().unwrap().to_css();
//! assert!(css.contains("animation: rotateAnimation 2s linear forwards;"));
//! ```

use crate::curve_editor::{CanvasGeometry, CurveEditor};
use crate::document::DocumentTemplate;
use crate::markers::{marker_views, MarkerView};
use serde::{Deserialize, Serialize};
use spinframe_animation::{
    export_keyframes, sample_rotation, Easing, EasingCurve, FrameToken, KeyframeExport,
    KeypointStore, Playback, PlaybackFrame, TickLabel, Timeline, TimelineSettings, TrackSet,
};
use spinframe_core::{
    Axis, DragTarget, EditorEvent, EditorWarning, EventDispatcher, EventKind, GestureId,
    GestureRuntime, GuardedAction, KeypointId, PointerPos, Rotation, Selection,
};

/// Segments used when drawing the curve editor polyline (0.01 steps)
pub const CURVE_SEGMENTS: usize = 100;

/// Editor configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub timeline: TimelineSettings,
    pub canvas: CanvasGeometry,
}

/// Every mutation the editor accepts
#[derive(Clone, Debug, PartialEq)]
pub enum EditorCommand {
    /// Move an axis slider
    SetControl { axis: Axis, value: f32 },
    /// Add a keypoint at the playhead using the axis' control value
    AddKeypoint { axis: Axis },
    AddKeypointAt { axis: Axis, time: f32, value: f32 },
    Delete { axis: Axis, id: KeypointId },
    Retime { axis: Axis, id: KeypointId, time: f32 },
    SetEasingPreset { axis: Axis, id: KeypointId, name: String },
    SetCustomEasing { axis: Axis, id: KeypointId, curve: EasingCurve },
    Select(Selection),
    ClearSelection,
    Scrub(f32),
    TogglePlayback,
    StartPlayback,
    StopPlayback { reset_to_zero: bool },
}

/// The rotation keyframe editor
pub struct EditorState {
    store: KeypointStore,
    timeline: Timeline,
    canvas: CanvasGeometry,
    selection: Option<Selection>,
    curve_editor: Option<CurveEditor>,
    scrub_time: f32,
    controls: Rotation,
    preview: Rotation,
    playback: Playback,
    gestures: GestureRuntime,
    /// Timeline length when the current keypoint drag started
    drag_duration: Option<f32>,
    dispatcher: EventDispatcher,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl EditorState {
    pub fn new(settings: EditorSettings) -> Self {
        Self::with_store(KeypointStore::new(), settings)
    }

    /// Open an editor on existing tracks (a loaded project)
    pub fn with_store(mut store: KeypointStore, settings: EditorSettings) -> Self {
        store.set_grid(settings.timeline.grid());
        store.normalize();

        let mut timeline = Timeline::new(settings.timeline);
        timeline.recompute(store.tracks());
        let preview = sample_rotation(store.tracks(), 0.0);

        Self {
            store,
            timeline,
            canvas: settings.canvas,
            selection: None,
            curve_editor: None,
            scrub_time: 0.0,
            controls: preview,
            preview,
            playback: Playback::new(),
            gestures: GestureRuntime::new(),
            drag_duration: None,
            dispatcher: EventDispatcher::new(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn store(&self) -> &KeypointStore {
        &self.store
    }

    pub fn tracks(&self) -> &TrackSet {
        self.store.tracks()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Current timeline length in seconds
    pub fn duration(&self) -> f32 {
        self.timeline.duration()
    }

    pub fn canvas(&self) -> &CanvasGeometry {
        &self.canvas
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Curve editor of the selected keypoint
    pub fn curve_editor(&self) -> Option<&CurveEditor> {
        self.curve_editor.as_ref()
    }

    /// Playhead position in seconds
    pub fn scrub_time(&self) -> f32 {
        self.scrub_time
    }

    /// Current slider values
    pub fn controls(&self) -> Rotation {
        self.controls
    }

    /// Rotation currently shown by the live preview
    pub fn preview(&self) -> Rotation {
        self.preview
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn gestures(&self) -> &GestureRuntime {
        &self.gestures
    }

    /// Rotation at an arbitrary time
    pub fn sample(&self, time: f32) -> Rotation {
        sample_rotation(self.store.tracks(), time)
    }

    /// Markers of one axis track
    pub fn markers(&self, axis: Axis) -> Vec<MarkerView> {
        marker_views(axis, self.store.track(axis), &self.timeline, self.selection)
    }

    /// Timeline tick labels
    pub fn labels(&self) -> Vec<TickLabel> {
        self.timeline.labels()
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Subscribe to one kind of event
    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: Fn(&EditorEvent) + Send + Sync + 'static,
    {
        self.dispatcher.register(kind, handler);
    }

    /// Subscribe to every event
    pub fn on_any<F>(&mut self, handler: F)
    where
        F: Fn(&EditorEvent) + Send + Sync + 'static,
    {
        self.dispatcher.register_all(handler);
    }

    fn emit(&self, event: EditorEvent) {
        self.dispatcher.dispatch(&event);
    }

    fn warn(&self, warning: EditorWarning) -> EditorWarning {
        self.emit(EditorEvent::Warning(warning.clone()));
        warning
    }

    fn refresh_duration(&mut self) {
        if self.timeline.recompute(self.store.tracks()) {
            self.emit(EditorEvent::DurationChanged(self.timeline.duration()));
        }
    }

    fn show_preview(&mut self, rotation: Rotation) {
        self.preview = rotation;
        self.emit(EditorEvent::PreviewChanged(rotation));
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Apply one command. Only the guarded actions can fail.
    pub fn apply(&mut self, command: EditorCommand) -> Result<(), EditorWarning> {
        match command {
            EditorCommand::SetControl { axis, value } => self.set_control(axis, value),
            EditorCommand::AddKeypoint { axis } => {
                self.add_keypoint(axis);
            }
            EditorCommand::AddKeypointAt { axis, time, value } => {
                self.add_keypoint_at(axis, time, value);
            }
            EditorCommand::Delete { axis, id } => {
                self.delete(axis, id);
            }
            EditorCommand::Retime { axis, id, time } => {
                self.retime(axis, id, time);
            }
            EditorCommand::SetEasingPreset { axis, id, name } => {
                self.set_easing_preset(axis, id, &name);
            }
            EditorCommand::SetCustomEasing { axis, id, curve } => {
                self.set_custom_easing(axis, id, curve);
            }
            EditorCommand::Select(selection) => {
                self.select(selection);
            }
            EditorCommand::ClearSelection => self.clear_selection(),
            EditorCommand::Scrub(time) => {
                self.scrub_to(time);
            }
            EditorCommand::TogglePlayback => self.toggle_playback()?,
            EditorCommand::StartPlayback => {
                self.start_playback()?;
            }
            EditorCommand::StopPlayback { reset_to_zero } => {
                self.stop_playback(reset_to_zero);
            }
        }
        Ok(())
    }

    /// Move an axis slider. The preview follows unless playback is running.
    pub fn set_control(&mut self, axis: Axis, value: f32) {
        self.controls.set(axis, value);
        if !self.playback.is_playing() {
            self.show_preview(self.controls);
        }
    }

    /// Add a keypoint at the playhead with the axis' current control value
    pub fn add_keypoint(&mut self, axis: Axis) -> KeypointId {
        self.add_keypoint_at(axis, self.scrub_time, self.controls.get(axis))
    }

    pub fn add_keypoint_at(&mut self, axis: Axis, time: f32, value: f32) -> KeypointId {
        let id = self.store.add_keypoint(axis, time, value);
        let time = self.store.get(axis, id).map_or(0.0, |keypoint| keypoint.time);
        self.emit(EditorEvent::KeypointAdded { axis, id, time });
        self.refresh_duration();
        id
    }

    /// Delete a keypoint; clears the selection if it pointed there
    pub fn delete(&mut self, axis: Axis, id: KeypointId) -> bool {
        if self.store.delete_keypoint(axis, id).is_none() {
            return false;
        }
        self.emit(EditorEvent::KeypointRemoved { axis, id });
        if self.selection == Some(Selection::new(axis, id)) {
            self.clear_selection();
        }
        self.refresh_duration();
        true
    }

    /// Move a keypoint in time; returns the quantized time
    pub fn retime(&mut self, axis: Axis, id: KeypointId, raw_time: f32) -> Option<f32> {
        let time = self.store.retime_keypoint(axis, id, raw_time)?;
        self.emit(EditorEvent::KeypointMoved { axis, id, time });
        self.refresh_duration();
        Some(time)
    }

    /// Switch a keypoint to a named preset (unknown names become linear)
    pub fn set_easing_preset(&mut self, axis: Axis, id: KeypointId, name: &str) -> bool {
        self.set_easing(axis, id, Easing::from_name(name))
    }

    pub fn set_custom_easing(&mut self, axis: Axis, id: KeypointId, curve: EasingCurve) -> bool {
        self.set_easing(axis, id, Easing::Custom(curve))
    }

    fn set_easing(&mut self, axis: Axis, id: KeypointId, easing: Easing) -> bool {
        if !self.store.set_easing(axis, id, easing) {
            return false;
        }
        if let Some(editor) = self.curve_editor.as_mut() {
            if editor.selection() == Selection::new(axis, id) {
                editor.reset_to(&easing);
            }
        }
        self.emit(EditorEvent::EasingChanged { axis, id });
        true
    }

    /// Select a keypoint and open its curve editor
    pub fn select(&mut self, selection: Selection) -> bool {
        let Some(keypoint) = self.store.get(selection.axis, selection.id) else {
            return false;
        };
        self.curve_editor = Some(CurveEditor::open(selection, &keypoint.easing));
        self.selection = Some(selection);
        self.emit(EditorEvent::SelectionChanged(Some(selection)));
        true
    }

    pub fn clear_selection(&mut self) {
        self.curve_editor = None;
        if self.selection.take().is_some() {
            self.emit(EditorEvent::SelectionChanged(None));
        }
    }

    /// Move the playhead. The time is clamped to the timeline and snapped to
    /// the grid; controls and preview take the sampled rotation. Scrubbing
    /// during playback stops it where it is.
    pub fn scrub_to(&mut self, raw_time: f32) -> Rotation {
        if self.playback.is_playing() {
            self.stop_playback(false);
        }
        let clamped = if raw_time.is_finite() {
            raw_time.clamp(0.0, self.timeline.duration())
        } else {
            0.0
        };
        let time = self.store.grid().quantize(clamped);
        self.move_playhead(time);
        self.preview
    }

    fn move_playhead(&mut self, time: f32) {
        self.scrub_time = time;
        self.emit(EditorEvent::PlayheadMoved(time));
        let rotation = self.sample(time);
        self.controls = rotation;
        self.show_preview(rotation);
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Start from zero. Refused with a warning below two keypoints.
    pub fn start_playback(&mut self) -> Result<FrameToken, EditorWarning> {
        let token = match self.playback.start(self.store.tracks()) {
            Ok(token) => token,
            Err(warning) => return Err(self.warn(warning)),
        };
        self.move_playhead(0.0);
        let duration = self.playback.duration().unwrap_or(0.0);
        tracing::info!(duration, "playback started");
        self.emit(EditorEvent::PlaybackStarted { duration });
        Ok(token)
    }

    /// Stop playback; optionally return the playhead to zero
    pub fn stop_playback(&mut self, reset_to_zero: bool) -> bool {
        let was_playing = self.playback.stop();
        if reset_to_zero {
            self.move_playhead(0.0);
        }
        if was_playing {
            self.emit(EditorEvent::PlaybackStopped { reset_to_zero });
        }
        was_playing
    }

    /// Play button: stop and rewind while playing, otherwise start
    pub fn toggle_playback(&mut self) -> Result<(), EditorWarning> {
        if self.playback.is_playing() {
            self.stop_playback(true);
            Ok(())
        } else {
            self.start_playback().map(|_| ())
        }
    }

    /// Advance playback to `elapsed` seconds. `None` when not playing.
    ///
    /// The terminal frame leaves the playhead at the end of the animation.
    pub fn frame(&mut self, elapsed: f32) -> Option<PlaybackFrame> {
        let token = self.playback.token()?;
        let frame = self.playback.tick(token, elapsed, self.store.tracks())?;

        self.scrub_time = frame.time();
        self.emit(EditorEvent::PlayheadMoved(frame.time()));
        self.controls = frame.rotation();
        self.show_preview(frame.rotation());

        if frame.is_finished() {
            tracing::info!(duration = frame.time(), "playback finished");
            self.emit(EditorEvent::PlaybackFinished);
        }
        Some(frame)
    }

    /// Run a whole playback on synthetic time, one frame every
    /// `frame_interval` seconds. Returns the number of frames produced.
    pub fn run_playback<F>(
        &mut self,
        frame_interval: f32,
        mut on_frame: F,
    ) -> Result<usize, EditorWarning>
    where
        F: FnMut(&PlaybackFrame),
    {
        self.start_playback()?;
        let duration = self.playback.duration().unwrap_or(0.0);
        let interval = if frame_interval.is_finite() && frame_interval > 0.0 {
            frame_interval
        } else {
            duration
        };

        let mut frames = 0;
        loop {
            frames += 1;
            let elapsed = frames as f32 * interval;
            let Some(frame) = self.frame(elapsed) else {
                break;
            };
            on_frame(&frame);
            if frame.is_finished() {
                break;
            }
        }
        Ok(frames)
    }

    // ========================================================================
    // Pointer drags
    // ========================================================================
    //
    // Timeline drags (playhead, keypoints) take positions as fractions of the
    // timeline width in `x`; curve handle drags take canvas pixels.

    /// Press on the timeline: jump the playhead there and start dragging it
    pub fn press_playhead(&mut self, position: f32) -> GestureId {
        let id = self
            .gestures
            .press(DragTarget::Playhead, PointerPos::new(position, 0.0));
        self.scrub_to(self.timeline.time_at(position));
        id
    }

    /// Press on a keypoint marker: select it and start dragging it
    pub fn press_keypoint(&mut self, selection: Selection, position: f32) -> Option<GestureId> {
        if !self.select(selection) {
            return None;
        }
        // Retiming resizes the timeline; map the pointer against the length at press
        self.drag_duration.get_or_insert(self.timeline.duration());
        Some(
            self.gestures
                .press(DragTarget::Keypoint(selection), PointerPos::new(position, 0.0)),
        )
    }

    /// Press on the curve canvas; starts a drag if a handle was hit
    pub fn press_curve(&mut self, pos: PointerPos) -> Option<GestureId> {
        let handle = self.curve_editor.as_ref()?.hit_test(pos, &self.canvas)?;
        Some(self.gestures.press(DragTarget::CurveHandle(handle), pos))
    }

    /// Pointer moved; every active drag follows
    pub fn pointer_move(&mut self, pos: PointerPos) {
        for target in self.gestures.move_all(pos) {
            match target {
                DragTarget::Playhead => {
                    self.scrub_to(self.timeline.time_at(pos.x));
                }
                DragTarget::Keypoint(selection) => {
                    let duration = self.drag_duration.unwrap_or(self.timeline.duration());
                    let time = pos.x.clamp(0.0, 1.0) * duration;
                    self.retime(selection.axis, selection.id, time);
                }
                DragTarget::CurveHandle(handle) => self.drag_curve_handle(handle, pos),
            }
        }
    }

    fn drag_curve_handle(&mut self, handle: usize, pos: PointerPos) {
        let Some(editor) = self.curve_editor.as_mut() else {
            return;
        };
        let Some(curve) = editor.drag_handle(handle, pos, &self.canvas) else {
            return;
        };
        let selection = editor.selection();
        // Write straight to the store so the editor keeps its edited state
        if self
            .store
            .set_easing(selection.axis, selection.id, Easing::Custom(curve))
        {
            self.emit(EditorEvent::EasingChanged {
                axis: selection.axis,
                id: selection.id,
            });
        }
    }

    /// Pointer released anywhere: end every drag. Returns how many ended.
    pub fn pointer_release(&mut self) -> usize {
        self.drag_duration = None;
        self.gestures.release_all().len()
    }

    /// Curve polyline in canvas pixels for the selected keypoint
    pub fn curve_polyline(&self) -> Option<Vec<PointerPos>> {
        self.curve_editor
            .as_ref()
            .map(|editor| editor.polyline(&self.canvas, CURVE_SEGMENTS))
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Bake the tracks into keyframes. Refused below two keypoints.
    pub fn export(&self) -> Result<KeyframeExport, EditorWarning> {
        if let Err(warning) =
            EditorWarning::require_keypoints(GuardedAction::Export, self.store.total_keypoints())
        {
            return Err(self.warn(warning));
        }
        let export = export_keyframes(self.store.tracks());
        tracing::info!(
            duration = export.duration,
            steps = export.steps.len(),
            "animation exported"
        );
        Ok(export)
    }

    /// Standalone HTML page playing the animation
    pub fn export_document(&self, template: &DocumentTemplate) -> Result<String, EditorWarning> {
        self.export().map(|export| template.render(&export))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder(editor: &mut EditorState) -> Arc<Mutex<Vec<EditorEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        editor.on_any(move |event| sink.lock().unwrap().push(event.clone()));
        events
    }

    #[test]
    fn test_add_at_playhead_uses_controls() {
        let mut editor = EditorState::default();
        editor.set_control(Axis::Y, 45.0);
        editor.scrub_to(3.33);
        // Scrubbing resamples the controls from the (empty) tracks
        assert_eq!(editor.controls().y, 0.0);
        assert_eq!(editor.scrub_time(), 3.4);

        editor.set_control(Axis::Y, 45.0);
        let id = editor.add_keypoint(Axis::Y);
        let keypoint = editor.store().get(Axis::Y, id).unwrap();
        assert_eq!(keypoint.time, 3.4);
        assert_eq!(keypoint.value, 45.0);
    }

    #[test]
    fn test_duration_grows_but_not_below_initial_length() {
        let mut editor = EditorState::default();
        assert_eq!(editor.duration(), 10.0);

        let id = editor.add_keypoint_at(Axis::X, 14.0, 1.0);
        assert_eq!(editor.duration(), 14.0);

        editor.retime(Axis::X, id, 1.0);
        assert_eq!(editor.duration(), 10.0);
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut editor = EditorState::default();
        let id = editor.add_keypoint_at(Axis::Z, 1.0, 10.0);
        let selection = Selection::new(Axis::Z, id);
        assert!(editor.select(selection));
        assert!(editor.curve_editor().is_some());

        assert!(editor.delete(Axis::Z, id));
        assert_eq!(editor.selection(), None);
        assert!(editor.curve_editor().is_none());

        // Unknown ids are no-ops
        assert!(!editor.delete(Axis::Z, id));
        assert!(!editor.select(selection));
        assert_eq!(editor.retime(Axis::Z, id, 2.0), None);
    }

    #[test]
    fn test_preset_refreshes_curve_editor() {
        let mut editor = EditorState::default();
        let id = editor.add_keypoint_at(Axis::X, 1.0, 10.0);
        editor.select(Selection::new(Axis::X, id));

        editor
            .apply(EditorCommand::SetEasingPreset {
                axis: Axis::X,
                id,
                name: "ease-in-out".to_string(),
            })
            .unwrap();
        assert_eq!(
            editor.curve_editor().unwrap().curve(),
            EasingCurve::from_coords(0.42, 0.0, 0.58, 1.0)
        );
        assert_eq!(editor.markers(Axis::X)[0].easing_label, "ease-in-out");
    }

    #[test]
    fn test_refused_play_emits_warning() {
        let mut editor = EditorState::default();
        let events = recorder(&mut editor);
        editor.add_keypoint_at(Axis::X, 0.0, 0.0);

        let result = editor.apply(EditorCommand::TogglePlayback);
        assert!(result.is_err());
        assert!(!editor.is_playing());

        let events = events.lock().unwrap();
        assert!(matches!(
            events.last(),
            Some(EditorEvent::Warning(EditorWarning::NotEnoughKeypoints { found: 1, .. }))
        ));
    }

    #[test]
    fn test_toggle_stops_and_rewinds() {
        let mut editor = EditorState::default();
        editor.add_keypoint_at(Axis::X, 0.0, 0.0);
        editor.add_keypoint_at(Axis::X, 2.0, 90.0);

        editor.toggle_playback().unwrap();
        let frame = editor.frame(1.0).unwrap();
        assert!(!frame.is_finished());
        assert_eq!(editor.scrub_time(), 1.0);
        assert!((editor.preview().x - 45.0).abs() < 1e-4);

        editor.toggle_playback().unwrap();
        assert!(!editor.is_playing());
        assert_eq!(editor.scrub_time(), 0.0);
        assert_eq!(editor.preview().x, 0.0);
        assert!(editor.frame(1.5).is_none());
    }

    #[test]
    fn test_scrub_during_playback_stops_in_place() {
        let mut editor = EditorState::default();
        editor.add_keypoint_at(Axis::X, 0.0, 0.0);
        editor.add_keypoint_at(Axis::X, 2.0, 90.0);
        editor.start_playback().unwrap();

        editor.scrub_to(1.0);
        assert!(!editor.is_playing());
        assert_eq!(editor.scrub_time(), 1.0);
    }

    #[test]
    fn test_set_control_does_not_fight_playback() {
        let mut editor = EditorState::default();
        editor.add_keypoint_at(Axis::X, 0.0, 0.0);
        editor.add_keypoint_at(Axis::X, 2.0, 90.0);
        editor.start_playback().unwrap();

        editor.set_control(Axis::Z, 30.0);
        assert_eq!(editor.preview().z, 0.0);

        editor.stop_playback(false);
        editor.set_control(Axis::Z, 30.0);
        assert_eq!(editor.preview().z, 30.0);
    }

    #[test]
    fn test_curve_drag_promotes_to_custom() {
        let mut editor = EditorState::default();
        let id = editor.add_keypoint_at(Axis::Y, 1.0, 10.0);
        editor.select(Selection::new(Axis::Y, id));

        // Linear handles sit at the canvas corners: p2 = (1, 1) → (190, 10)
        assert!(editor.press_curve(PointerPos::new(100.0, 100.0)).is_none());
        assert!(editor.press_curve(PointerPos::new(189.0, 11.0)).is_some());

        editor.pointer_move(PointerPos::new(100.0, 100.0));
        let keypoint = editor.store().get(Axis::Y, id).unwrap();
        assert_eq!(
            keypoint.easing,
            Easing::Custom(EasingCurve::from_coords(0.0, 0.0, 0.5, 0.5))
        );
        assert!(editor.curve_editor().unwrap().is_edited());

        assert_eq!(editor.pointer_release(), 1);
        assert!(!editor.gestures().is_dragging());
    }

    #[test]
    fn test_keypoint_drag_retimes_on_grid() {
        let mut editor = EditorState::default();
        let id = editor.add_keypoint_at(Axis::X, 1.0, 10.0);
        let selection = Selection::new(Axis::X, id);

        assert!(editor.press_keypoint(selection, 0.1).is_some());
        assert_eq!(editor.selection(), Some(selection));

        editor.pointer_move(PointerPos::new(0.313, 0.0));
        assert_eq!(editor.store().get(Axis::X, id).unwrap().time, 3.2);

        editor.pointer_release();
        editor.pointer_move(PointerPos::new(0.9, 0.0));
        assert_eq!(editor.store().get(Axis::X, id).unwrap().time, 3.2);
    }

    #[test]
    fn test_keypoint_drag_holds_scale_while_timeline_resizes() {
        let mut editor = EditorState::default();
        editor.add_keypoint_at(Axis::X, 0.0, 0.0);
        let id = editor.add_keypoint_at(Axis::X, 14.0, 90.0);
        assert_eq!(editor.duration(), 14.0);
        let time_of = |editor: &EditorState| editor.store().get(Axis::X, id).unwrap().time;

        editor.press_keypoint(Selection::new(Axis::X, id), 1.0);
        for _ in 0..5 {
            editor.pointer_move(PointerPos::new(0.9, 0.0));
            assert_eq!(time_of(&editor), 12.6);
        }
        assert_eq!(editor.duration(), 12.6);

        editor.pointer_move(PointerPos::new(0.5, 0.0));
        assert_eq!(time_of(&editor), 7.0);
        assert_eq!(editor.duration(), 10.0);
        editor.pointer_move(PointerPos::new(0.9, 0.0));
        assert_eq!(time_of(&editor), 12.6);

        // A new drag maps against the timeline as it is now
        editor.pointer_release();
        editor.press_keypoint(Selection::new(Axis::X, id), 1.0);
        editor.pointer_move(PointerPos::new(0.2, 0.0));
        assert_eq!(time_of(&editor), 2.6);
    }

    #[test]
    fn test_export_guard() {
        let mut editor = EditorState::default();
        assert!(matches!(
            editor.export(),
            Err(EditorWarning::NotEnoughKeypoints {
                action: GuardedAction::Export,
                found: 0
            })
        ));

        editor.add_keypoint_at(Axis::X, 0.0, 0.0);
        editor.add_keypoint_at(Axis::Y, 1.0, 20.0);
        let export = editor.export().unwrap();
        assert_eq!(export.duration, 1.0);
        assert_eq!(export.steps.len(), 2);
    }
}
