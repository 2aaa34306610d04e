//! reelplay - video playback controller with a terminal player screen
//!
//! The controller owns playback status, transport position, volume/mute,
//! zoom and overlay visibility, and the orientation/fullscreen side effects
//! of the screen that hosts it. Device and media engine sit behind traits.
//!
//! # Modules
//!
//! - `models` - Status, resize mode, event payloads, snapshots
//! - `player` - Controller, device and engine seams
//! - `app` - Terminal player screen state and key handling
//! - `ui` - ratatui rendering
//! - `cli` / `commands` - Scriptable command line
//! - `config` - TOML configuration

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod player;
pub mod ui;

// Re-export commonly used types
pub use models::{
    LoadInfo, Orientation, PlaybackSnapshot, PlaybackStatus, ProgressUpdate, ResizeMode,
};

pub use app::PlayerScreen;
pub use player::{
    DeviceControl, HeadlessDevice, MediaEngine, MediaEvent, PlaybackController, PlayerError,
    PlayerOptions, SimulatedEngine,
};
