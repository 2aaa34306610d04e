//! Player screen state and key handling
//!
//! Wraps one [`PlaybackController`] the way the mobile screen wrapped its
//! video element: keys become intents, ticks drive the engine clock, and
//! rejected intents surface as an error line.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::player::{DeviceControl, PlaybackController, SimulatedEngine};

const VOLUME_STEP: f64 = 0.1;
const BRIGHTNESS_STEP: f64 = 0.1;

/// Terminal player screen
pub struct PlayerScreen<D: DeviceControl> {
    /// Title shown in the top bar
    pub title: String,
    /// Source being played
    pub uri: String,
    /// Whether the screen is still open
    pub running: bool,
    /// Last rejected intent, cleared by the next key press
    pub error: Option<String>,
    seek_step: f64,
    player: PlaybackController<SimulatedEngine, D>,
}

impl<D: DeviceControl> PlayerScreen<D> {
    pub fn new(
        title: impl Into<String>,
        uri: impl Into<String>,
        player: PlaybackController<SimulatedEngine, D>,
        seek_step: f64,
    ) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
            running: true,
            error: None,
            seek_step,
            player,
        }
    }

    /// Screen mounted: enter landscape/fullscreen and start loading
    pub fn mount(&mut self) {
        tracing::info!(uri = %self.uri, "opening player");
        self.player.enter();
        self.player.engine_mut().load();
        self.player.drain_events();
    }

    /// Back navigation: restore the device and stop the loop
    pub fn back(&mut self) {
        self.player.exit();
        self.running = false;
    }

    /// Advance the engine clock by `dt` seconds and apply its events
    pub fn on_tick(&mut self, dt: f64) {
        self.player.engine_mut().tick(dt);
        self.player.drain_events();
    }

    pub fn player(&self) -> &PlaybackController<SimulatedEngine, D> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlaybackController<SimulatedEngine, D> {
        &mut self.player
    }

    pub fn seek_step(&self) -> f64 {
        self.seek_step
    }

    fn report<T, E: std::fmt::Display>(&mut self, result: Result<T, E>) {
        if let Err(e) = result {
            self.error = Some(e.to_string());
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.back();
            return true;
        }

        if self.player.track_menu_visible() {
            return self.handle_track_menu_key(key);
        }

        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => {
                self.back();
                true
            }
            KeyCode::Char(' ') | KeyCode::Char('k') => {
                let result = self.player.toggle_play();
                self.report(result);
                true
            }
            KeyCode::Left | KeyCode::Char('j') => {
                let result = self.player.seek_relative(-self.seek_step);
                self.report(result);
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let result = self.player.seek_relative(self.seek_step);
                self.report(result);
                true
            }
            KeyCode::Home => {
                let result = self.player.seek_absolute(0.0);
                self.report(result);
                true
            }
            KeyCode::End => {
                let end = self.player.duration();
                let result = self.player.seek_absolute(end);
                self.report(result);
                true
            }
            KeyCode::Char('m') => {
                self.player.toggle_mute();
                true
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let volume = self.player.volume() + VOLUME_STEP;
                self.player.set_volume(volume);
                true
            }
            KeyCode::Char('-') => {
                let volume = self.player.volume() - VOLUME_STEP;
                self.player.set_volume(volume);
                true
            }
            KeyCode::Char(']') => {
                let brightness = self.player.brightness() + BRIGHTNESS_STEP;
                self.player.set_brightness(brightness);
                true
            }
            KeyCode::Char('[') => {
                let brightness = self.player.brightness() - BRIGHTNESS_STEP;
                self.player.set_brightness(brightness);
                true
            }
            KeyCode::Char('z') => {
                self.player.toggle_zoom();
                true
            }
            KeyCode::Char('t') => {
                self.player.open_track_menu();
                true
            }
            KeyCode::Enter => {
                self.player.toggle_controls_visibility();
                true
            }
            _ => false,
        }
    }

    /// Keys while the audio & subtitle menu is open
    fn handle_track_menu_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                self.player.close_track_menu(true);
                true
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.player.close_track_menu(false);
                true
            }
            _ => false,
        }
    }
}

impl<D: DeviceControl> std::fmt::Debug for PlayerScreen<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerScreen")
            .field("title", &self.title)
            .field("running", &self.running)
            .field("player", &self.player)
            .finish()
    }
}
