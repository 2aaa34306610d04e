//! Playback controller for the player screen
//!
//! Mediates between user intents, the media engine and the transient UI
//! affordances (control overlay, sliders, zoom, track menu), and owns the
//! orientation/fullscreen side effects for the lifetime of the screen.

use thiserror::Error;

use crate::models::{LoadInfo, PlaybackSnapshot, PlaybackStatus, ProgressUpdate, ResizeMode};
use crate::player::device::DeviceControl;
use crate::player::engine::{MediaEngine, MediaEvent};

const MIN_BRIGHTNESS: f64 = 0.1;
const DEFAULT_BRIGHTNESS: f64 = 0.5;

/// Errors from playback intents
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayerError {
    #[error("Duration not known yet, seek ignored")]
    DurationUnknown,
    #[error("Invalid seek target: {0}")]
    InvalidTarget(f64),
    #[error("Playback failed: {0}")]
    Failed(String),
}

/// Initial settings for a controller
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerOptions {
    /// Start playing as soon as the screen mounts
    pub autoplay: bool,
    pub volume: f64,
    pub resize_mode: ResizeMode,
    /// Position to seek to once the source has loaded
    pub resume_at: Option<f64>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            volume: 1.0,
            resize_mode: ResizeMode::Cover,
            resume_at: None,
        }
    }
}

/// Owns the playback state of one player screen
pub struct PlaybackController<E: MediaEngine, D: DeviceControl> {
    engine: E,
    device: D,

    status: PlaybackStatus,
    /// Intent held when buffering started; `status` returns to it
    pre_buffer_status: PlaybackStatus,
    position: f64,
    duration: f64,
    muted: bool,
    volume: f64,
    brightness: f64,
    zoom: ResizeMode,
    controls_visible: bool,
    track_menu_visible: bool,
    error: Option<String>,
    resume_at: Option<f64>,

    entered: bool,
    exited: bool,
}

impl<E: MediaEngine, D: DeviceControl> PlaybackController<E, D> {
    /// Create a controller with default options
    pub fn new(engine: E, device: D) -> Self {
        Self::with_options(engine, device, PlayerOptions::default())
    }

    /// Create a controller and push its initial state to the engine
    pub fn with_options(mut engine: E, device: D, options: PlayerOptions) -> Self {
        let status = if options.autoplay {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Paused
        };
        let volume = if options.volume.is_finite() {
            options.volume.clamp(0.0, 1.0)
        } else {
            1.0
        };

        engine.set_paused(status == PlaybackStatus::Paused);
        engine.set_muted(false);
        engine.set_volume(volume);
        engine.set_resize_mode(options.resize_mode);

        Self {
            engine,
            device,
            status,
            pre_buffer_status: status,
            position: 0.0,
            duration: 0.0,
            muted: false,
            volume,
            brightness: DEFAULT_BRIGHTNESS,
            zoom: options.resize_mode,
            controls_visible: false,
            track_menu_visible: false,
            error: None,
            resume_at: options.resume_at.filter(|t| t.is_finite() && *t > 0.0),
            entered: false,
            exited: false,
        }
    }

    /// Supply a resume position, applied by the next load event
    pub fn with_resume_at(mut self, seconds: f64) -> Self {
        self.resume_at = Some(seconds).filter(|t| t.is_finite() && *t > 0.0);
        self
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Screen mounted: landscape and fullscreen
    pub fn enter(&mut self) {
        if self.entered {
            return;
        }
        self.entered = true;
        tracing::debug!("player screen entered");
        self.device.lock_to_landscape();
        self.device.set_fullscreen(true);
    }

    /// Screen left: portrait and windowed
    pub fn exit(&mut self) {
        if !self.entered || self.exited {
            return;
        }
        self.exited = true;
        tracing::debug!(position = self.position, "player screen exited");
        self.device.lock_to_portrait();
        self.device.set_fullscreen(false);
    }

    pub fn is_active(&self) -> bool {
        self.entered && !self.exited
    }

    // -------------------------------------------------------------------------
    // Transport
    // -------------------------------------------------------------------------

    pub fn play(&mut self) -> Result<(), PlayerError> {
        if let Some(msg) = &self.error {
            tracing::debug!("play rejected after failure");
            return Err(PlayerError::Failed(msg.clone()));
        }
        self.set_intent(PlaybackStatus::Playing);
        Ok(())
    }

    pub fn pause(&mut self) {
        self.set_intent(PlaybackStatus::Paused);
    }

    pub fn toggle_play(&mut self) -> Result<(), PlayerError> {
        match self.intent() {
            PlaybackStatus::Playing => {
                self.pause();
                Ok(())
            }
            _ => self.play(),
        }
    }

    /// Current user intent, seen through buffering
    pub fn intent(&self) -> PlaybackStatus {
        match self.status {
            PlaybackStatus::Buffering => self.pre_buffer_status,
            other => other,
        }
    }

    fn set_intent(&mut self, intent: PlaybackStatus) {
        if self.status == PlaybackStatus::Buffering {
            // Buffering belongs to the engine; only the intent it returns to changes
            if self.pre_buffer_status != intent {
                self.pre_buffer_status = intent;
                self.engine.set_paused(intent == PlaybackStatus::Paused);
            }
            return;
        }
        if self.status == intent {
            return;
        }
        tracing::debug!(from = ?self.status, to = ?intent, "playback intent");
        self.status = intent;
        self.engine.set_paused(intent == PlaybackStatus::Paused);
    }

    /// Seek by `delta` seconds from the current position
    ///
    /// Negative deltas seek back. Returns the clamped target.
    pub fn seek_relative(&mut self, delta: f64) -> Result<f64, PlayerError> {
        if !delta.is_finite() {
            return Err(PlayerError::InvalidTarget(delta));
        }
        let base = if self.position.is_finite() {
            self.position
        } else {
            0.0
        };
        self.seek_absolute(base + delta)
    }

    /// Seek to `target` seconds, clamped to the known duration
    pub fn seek_absolute(&mut self, target: f64) -> Result<f64, PlayerError> {
        if let Some(msg) = &self.error {
            return Err(PlayerError::Failed(msg.clone()));
        }
        if !target.is_finite() {
            return Err(PlayerError::InvalidTarget(target));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            tracing::debug!(target, "seek before duration is known");
            return Err(PlayerError::DurationUnknown);
        }
        let clamped = target.clamp(0.0, self.duration);
        self.engine.seek(clamped);
        self.position = clamped;
        Ok(clamped)
    }

    // -------------------------------------------------------------------------
    // Audio and display hints
    // -------------------------------------------------------------------------

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.engine.set_muted(self.muted);
    }

    /// Set volume, clamped to [0, 1]; mute is left alone
    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            tracing::debug!("ignoring non-finite volume");
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        if volume != self.volume {
            self.volume = volume;
            self.engine.set_volume(volume);
        }
    }

    pub fn set_brightness(&mut self, brightness: f64) {
        if brightness.is_finite() {
            self.brightness = brightness.clamp(MIN_BRIGHTNESS, 1.0);
        }
    }

    pub fn toggle_zoom(&mut self) {
        self.zoom = self.zoom.toggled();
        self.engine.set_resize_mode(self.zoom);
    }

    /// Tap on the video surface
    pub fn toggle_controls_visibility(&mut self) {
        self.controls_visible = !self.controls_visible;
    }

    // -------------------------------------------------------------------------
    // Audio & subtitle menu
    // -------------------------------------------------------------------------

    /// Pause and show the audio/subtitle menu
    pub fn open_track_menu(&mut self) {
        if self.track_menu_visible {
            return;
        }
        self.pause();
        self.track_menu_visible = true;
    }

    /// Hide the menu and resume playback, whether applied or cancelled
    pub fn close_track_menu(&mut self, applied: bool) {
        if !self.track_menu_visible {
            return;
        }
        self.track_menu_visible = false;
        tracing::debug!(applied, "track menu closed");
        if self.error.is_none() {
            self.set_intent(PlaybackStatus::Playing);
        }
    }

    // -------------------------------------------------------------------------
    // Media events
    // -------------------------------------------------------------------------

    /// Pull and handle every event the engine has queued
    pub fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.engine.poll_event() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Loaded(info) => self.on_loaded(info),
            MediaEvent::Buffering(buffering) => self.on_buffering_changed(buffering),
            MediaEvent::Progress(update) => self.on_progress(update),
            MediaEvent::Failed(msg) => self.on_failed(msg),
        }
    }

    pub fn on_buffering_changed(&mut self, buffering: bool) {
        if self.error.is_some() {
            return;
        }
        match (buffering, self.status) {
            (true, PlaybackStatus::Buffering) => {}
            (false, PlaybackStatus::Paused | PlaybackStatus::Playing) => {}
            (true, intent) => {
                self.pre_buffer_status = intent;
                self.status = PlaybackStatus::Buffering;
            }
            (false, PlaybackStatus::Buffering) => {
                self.status = self.pre_buffer_status;
            }
        }
    }

    /// Store reported values as-is; clamping only happens on seeks
    pub fn on_progress(&mut self, update: ProgressUpdate) {
        if self.error.is_some() {
            return;
        }
        self.position = update.current_time;
        self.duration = update.seekable_duration;
    }

    pub fn on_loaded(&mut self, info: LoadInfo) {
        if self.error.is_some() {
            return;
        }
        tracing::info!(duration = info.duration, "media loaded");
        if info.duration.is_finite() && info.duration > 0.0 {
            self.duration = info.duration;
        }
        // Kept until a seek lands, so a load without a duration defers it
        if let Some(resume_at) = self.resume_at {
            match self.seek_absolute(resume_at) {
                Ok(target) => {
                    self.resume_at = None;
                    tracing::info!(target, "resumed watch position");
                }
                Err(e) => tracing::debug!("resume deferred: {}", e),
            }
        }
    }

    /// Media failure: paused, flagged, terminal for this screen
    pub fn on_failed(&mut self, message: String) {
        tracing::warn!("media failed: {}", message);
        self.status = PlaybackStatus::Paused;
        self.pre_buffer_status = PlaybackStatus::Paused;
        self.engine.set_paused(true);
        self.error = Some(message);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    pub fn zoom(&self) -> ResizeMode {
        self.zoom
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn track_menu_visible(&self) -> bool {
        self.track_menu_visible
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            status: self.status,
            position_seconds: self.position,
            duration_seconds: self.duration,
            muted: self.muted,
            volume: self.volume,
            brightness: self.brightness,
            zoom: self.zoom,
            controls_visible: self.controls_visible,
            track_menu_visible: self.track_menu_visible,
            error: self.error.clone(),
        }
    }
}

impl<E: MediaEngine, D: DeviceControl> Drop for PlaybackController<E, D> {
    fn drop(&mut self) {
        self.exit();
    }
}

impl<E: MediaEngine, D: DeviceControl> std::fmt::Debug for PlaybackController<E, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("snapshot", &self.snapshot())
            .field("entered", &self.entered)
            .field("exited", &self.exited)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Orientation;
    use crate::player::device::{DeviceCall, HeadlessDevice};
    use crate::player::engine::SimulatedEngine;

    type Controller = PlaybackController<SimulatedEngine, HeadlessDevice>;

    fn loaded(duration: f64, position: f64, status: PlaybackStatus) -> Controller {
        let options = PlayerOptions {
            autoplay: status == PlaybackStatus::Playing,
            ..PlayerOptions::default()
        };
        let mut player = PlaybackController::with_options(
            SimulatedEngine::new(duration),
            HeadlessDevice::new(),
            options,
        );
        player.on_loaded(LoadInfo { duration });
        player.on_progress(ProgressUpdate::new(position, duration));
        player
    }

    #[test]
    fn test_autoplay_starts_playing() {
        let player = PlaybackController::new(SimulatedEngine::new(60.0), HeadlessDevice::new());
        assert_eq!(player.status(), PlaybackStatus::Playing);
        assert!(!player.engine().is_paused());
    }

    #[test]
    fn test_without_autoplay_starts_paused() {
        let options = PlayerOptions {
            autoplay: false,
            ..PlayerOptions::default()
        };
        let player = PlaybackController::with_options(
            SimulatedEngine::new(60.0),
            HeadlessDevice::new(),
            options,
        );
        assert_eq!(player.status(), PlaybackStatus::Paused);
        assert!(player.engine().is_paused());
    }

    #[test]
    fn test_play_pause_are_idempotent() {
        let mut player = loaded(60.0, 0.0, PlaybackStatus::Paused);
        player.play().unwrap();
        player.play().unwrap();
        assert_eq!(player.status(), PlaybackStatus::Playing);
        player.pause();
        player.pause();
        assert_eq!(player.status(), PlaybackStatus::Paused);
        assert!(player.engine().is_paused());
    }

    #[test]
    fn test_toggle_play() {
        let mut player = loaded(60.0, 0.0, PlaybackStatus::Playing);
        player.toggle_play().unwrap();
        assert_eq!(player.status(), PlaybackStatus::Paused);
        player.toggle_play().unwrap();
        assert_eq!(player.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn test_seek_back_ten() {
        let mut player = loaded(120.0, 30.0, PlaybackStatus::Playing);
        assert_eq!(player.seek_relative(-10.0), Ok(20.0));
        assert_eq!(player.position(), 20.0);
        assert_eq!(player.status(), PlaybackStatus::Playing);
        assert_eq!(player.engine().seeks(), &[20.0]);
    }

    #[test]
    fn test_seek_forward_clamps_to_duration() {
        let mut player = loaded(120.0, 115.0, PlaybackStatus::Playing);
        assert_eq!(player.seek_relative(10.0), Ok(120.0));
        assert_eq!(player.position(), 120.0);
    }

    #[test]
    fn test_seek_back_clamps_to_zero() {
        let mut player = loaded(120.0, 4.0, PlaybackStatus::Paused);
        assert_eq!(player.seek_relative(-10.0), Ok(0.0));
        assert_eq!(player.status(), PlaybackStatus::Paused);
    }

    #[test]
    fn test_seek_absolute_clamps() {
        let mut player = loaded(120.0, 0.0, PlaybackStatus::Playing);
        assert_eq!(player.seek_absolute(500.0), Ok(120.0));
        assert_eq!(player.seek_absolute(-3.0), Ok(0.0));
        assert_eq!(player.seek_absolute(61.5), Ok(61.5));
    }

    #[test]
    fn test_seek_before_duration_known_is_rejected() {
        let mut player = PlaybackController::new(SimulatedEngine::new(60.0), HeadlessDevice::new());
        assert_eq!(player.seek_relative(10.0), Err(PlayerError::DurationUnknown));
        assert_eq!(player.seek_absolute(5.0), Err(PlayerError::DurationUnknown));
        assert!(player.engine().seeks().is_empty());
        assert_eq!(player.position(), 0.0);
    }

    #[test]
    fn test_seek_rejects_non_finite() {
        let mut player = loaded(60.0, 10.0, PlaybackStatus::Playing);
        assert!(matches!(
            player.seek_absolute(f64::NAN),
            Err(PlayerError::InvalidTarget(_))
        ));
        assert!(matches!(
            player.seek_relative(f64::INFINITY),
            Err(PlayerError::InvalidTarget(_))
        ));
        assert_eq!(player.position(), 10.0);
    }

    #[test]
    fn test_progress_stored_as_is() {
        let mut player = loaded(100.0, 0.0, PlaybackStatus::Playing);
        player.on_progress(ProgressUpdate::new(104.0, 100.0));
        assert_eq!(player.position(), 104.0);
        assert_eq!(player.duration(), 100.0);

        // The next seek still lands inside the range
        assert_eq!(player.seek_relative(10.0), Ok(100.0));
    }

    #[test]
    fn test_mute_independent_of_volume() {
        let mut player = loaded(60.0, 0.0, PlaybackStatus::Playing);
        player.set_volume(0.4);
        player.toggle_mute();
        assert!(player.is_muted());
        assert_eq!(player.volume(), 0.4);
        assert!(player.engine().is_muted());

        player.set_volume(0.9);
        assert!(player.is_muted());
        player.toggle_mute();
        assert!(!player.is_muted());
        assert_eq!(player.engine().volume(), 0.9);
    }

    #[test]
    fn test_volume_clamped() {
        let mut player = loaded(60.0, 0.0, PlaybackStatus::Playing);
        player.set_volume(1.7);
        assert_eq!(player.volume(), 1.0);
        player.set_volume(-0.2);
        assert_eq!(player.volume(), 0.0);
        player.set_volume(f64::NAN);
        assert_eq!(player.volume(), 0.0);
    }

    #[test]
    fn test_brightness_clamped() {
        let mut player = loaded(60.0, 0.0, PlaybackStatus::Playing);
        assert_eq!(player.brightness(), DEFAULT_BRIGHTNESS);
        player.set_brightness(0.0);
        assert_eq!(player.brightness(), MIN_BRIGHTNESS);
        player.set_brightness(3.0);
        assert_eq!(player.brightness(), 1.0);
    }

    #[test]
    fn test_zoom_round_trip() {
        let mut player = loaded(60.0, 12.0, PlaybackStatus::Playing);
        assert_eq!(player.zoom(), ResizeMode::Cover);
        player.toggle_zoom();
        assert_eq!(player.zoom(), ResizeMode::None);
        assert_eq!(player.engine().resize_mode(), ResizeMode::None);
        player.toggle_zoom();
        assert_eq!(player.zoom(), ResizeMode::Cover);
        assert_eq!(player.position(), 12.0);
    }

    #[test]
    fn test_controls_toggle_keeps_playing() {
        let mut player = loaded(60.0, 0.0, PlaybackStatus::Playing);
        player.toggle_controls_visibility();
        assert!(player.controls_visible());
        assert_eq!(player.status(), PlaybackStatus::Playing);
        player.toggle_controls_visibility();
        assert!(!player.controls_visible());
    }

    #[test]
    fn test_buffering_restores_prior_intent() {
        for start in [PlaybackStatus::Paused, PlaybackStatus::Playing] {
            let mut player = loaded(60.0, 10.0, start);
            player.on_buffering_changed(true);
            assert_eq!(player.status(), PlaybackStatus::Buffering);
            player.on_buffering_changed(false);
            assert_eq!(player.status(), start);
        }
    }

    #[test]
    fn test_repeated_buffering_keeps_first_intent() {
        let mut player = loaded(60.0, 10.0, PlaybackStatus::Playing);
        player.on_buffering_changed(true);
        player.on_buffering_changed(true);
        player.on_buffering_changed(false);
        assert_eq!(player.status(), PlaybackStatus::Playing);

        // Unbalanced end of buffering is a no-op
        player.on_buffering_changed(false);
        assert_eq!(player.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn test_pause_during_buffering_updates_intent() {
        let mut player = loaded(60.0, 10.0, PlaybackStatus::Playing);
        player.on_buffering_changed(true);
        player.pause();
        assert_eq!(player.status(), PlaybackStatus::Buffering);
        assert_eq!(player.intent(), PlaybackStatus::Paused);
        assert!(player.engine().is_paused());

        player.on_buffering_changed(false);
        assert_eq!(player.status(), PlaybackStatus::Paused);
    }

    #[test]
    fn test_resume_seek_issued_once() {
        let mut player =
            PlaybackController::new(SimulatedEngine::new(600.0), HeadlessDevice::new())
                .with_resume_at(90.0);
        player.on_loaded(LoadInfo { duration: 600.0 });
        player.on_loaded(LoadInfo { duration: 600.0 });
        assert_eq!(player.engine().seeks(), &[90.0]);
        assert_eq!(player.position(), 90.0);
    }

    #[test]
    fn test_resume_deferred_until_duration_known() {
        let mut player =
            PlaybackController::new(SimulatedEngine::new(600.0), HeadlessDevice::new())
                .with_resume_at(90.0);
        player.on_loaded(LoadInfo { duration: 0.0 });
        assert!(player.engine().seeks().is_empty());
        assert_eq!(player.position(), 0.0);

        player.on_loaded(LoadInfo { duration: 600.0 });
        player.on_loaded(LoadInfo { duration: 600.0 });
        assert_eq!(player.engine().seeks(), &[90.0]);
        assert_eq!(player.position(), 90.0);
    }

    #[test]
    fn test_load_without_resume_stays_at_zero() {
        let mut player = PlaybackController::new(SimulatedEngine::new(600.0), HeadlessDevice::new());
        player.on_loaded(LoadInfo { duration: 600.0 });
        assert_eq!(player.position(), 0.0);
        assert_eq!(player.duration(), 600.0);
        assert!(player.engine().seeks().is_empty());
    }

    #[test]
    fn test_failure_pauses_and_blocks_play() {
        let mut player = loaded(60.0, 10.0, PlaybackStatus::Playing);
        player.on_failed("source unreachable".into());
        assert_eq!(player.status(), PlaybackStatus::Paused);
        assert_eq!(player.error(), Some("source unreachable"));
        assert!(player.engine().is_paused());

        assert!(matches!(player.play(), Err(PlayerError::Failed(_))));
        assert!(matches!(player.seek_relative(5.0), Err(PlayerError::Failed(_))));
        player.on_buffering_changed(true);
        assert_eq!(player.status(), PlaybackStatus::Paused);
    }

    #[test]
    fn test_track_menu_pauses_and_resumes() {
        let mut player = loaded(60.0, 10.0, PlaybackStatus::Playing);
        player.open_track_menu();
        assert!(player.track_menu_visible());
        assert_eq!(player.status(), PlaybackStatus::Paused);

        player.close_track_menu(false);
        assert!(!player.track_menu_visible());
        assert_eq!(player.status(), PlaybackStatus::Playing);

        player.pause();
        player.open_track_menu();
        player.close_track_menu(true);
        assert_eq!(player.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn test_enter_exit_once() {
        let mut player = loaded(120.0, 30.0, PlaybackStatus::Playing);
        player.enter();
        player.enter();
        player.toggle_play().unwrap();
        player.seek_relative(10.0).unwrap();
        player.toggle_mute();
        player.toggle_zoom();
        player.exit();
        player.exit();

        let device = player.device();
        assert_eq!(
            device.calls(),
            &[
                DeviceCall::LockOrientation(Orientation::Landscape),
                DeviceCall::Fullscreen(true),
                DeviceCall::LockOrientation(Orientation::Portrait),
                DeviceCall::Fullscreen(false),
            ]
        );
        assert!(!player.is_active());
    }

    #[test]
    fn test_exit_without_enter_is_noop() {
        let mut player = loaded(60.0, 0.0, PlaybackStatus::Playing);
        player.exit();
        assert!(player.device().calls().is_empty());
    }

    #[test]
    fn test_drain_events_in_order() {
        let mut player = PlaybackController::new(SimulatedEngine::new(30.0), HeadlessDevice::new());
        player.engine_mut().load();
        assert_eq!(player.drain_events(), 3);
        assert_eq!(player.duration(), 30.0);
        assert_eq!(player.status(), PlaybackStatus::Playing);

        player.engine_mut().tick(2.5);
        player.drain_events();
        assert_eq!(player.position(), 2.5);
    }

    /// Device whose call log outlives the controller
    #[derive(Default)]
    struct SharedDevice(std::rc::Rc<std::cell::RefCell<HeadlessDevice>>);

    impl DeviceControl for SharedDevice {
        fn lock_to_landscape(&mut self) {
            self.0.borrow_mut().lock_to_landscape();
        }

        fn lock_to_portrait(&mut self) {
            self.0.borrow_mut().lock_to_portrait();
        }

        fn set_fullscreen(&mut self, enabled: bool) {
            self.0.borrow_mut().set_fullscreen(enabled);
        }
    }

    #[test]
    fn test_drop_after_enter_exits_once() {
        let device = SharedDevice::default();
        let log = device.0.clone();

        let mut player = PlaybackController::new(SimulatedEngine::new(60.0), device);
        player.enter();
        player.exit();
        drop(player);
        assert_eq!(log.borrow().calls().len(), 4);

        let device = SharedDevice::default();
        let log = device.0.clone();
        let mut player = PlaybackController::new(SimulatedEngine::new(60.0), device);
        player.enter();
        drop(player);
        assert_eq!(
            log.borrow().calls(),
            &[
                DeviceCall::LockOrientation(Orientation::Landscape),
                DeviceCall::Fullscreen(true),
                DeviceCall::LockOrientation(Orientation::Portrait),
                DeviceCall::Fullscreen(false),
            ]
        );
    }

    #[test]
    fn test_drop_without_enter_touches_nothing() {
        let device = SharedDevice::default();
        let log = device.0.clone();
        drop(PlaybackController::new(SimulatedEngine::new(60.0), device));
        assert!(log.borrow().calls().is_empty());
    }
}
