//! Playback core
//!
//! - Controller: playback state machine for one player screen
//! - Device: orientation and fullscreen side effects
//! - Engine: media element seam and a simulated engine

pub mod controller;
pub mod device;
pub mod engine;

pub use controller::{PlaybackController, PlayerError, PlayerOptions};
pub use device::{DeviceCall, DeviceControl, HeadlessDevice, TerminalDevice};
pub use engine::{MediaEngine, MediaEvent, SimulatedEngine};
