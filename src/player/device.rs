//! Device side effects - orientation lock and fullscreen display
//!
//! The controller only talks to [`DeviceControl`], so its state transitions
//! can run without a real device behind them.

use std::io::Write;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use serde::Serialize;

use crate::models::Orientation;

/// Device-level effects the player screen needs for its lifetime
///
/// Calls are fire-and-forget: implementations log failures instead of
/// returning them.
pub trait DeviceControl {
    fn lock_to_landscape(&mut self);
    fn lock_to_portrait(&mut self);
    fn set_fullscreen(&mut self, enabled: bool);
}

/// A single recorded device call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "call", content = "value", rename_all = "snake_case")]
pub enum DeviceCall {
    LockOrientation(Orientation),
    Fullscreen(bool),
}

/// Device without hardware behind it; records every call
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    calls: Vec<DeviceCall>,
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    /// Number of times `call` was received
    pub fn count(&self, call: DeviceCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    /// Orientation requested by the most recent lock
    pub fn orientation(&self) -> Option<Orientation> {
        self.calls.iter().rev().find_map(|c| match c {
            DeviceCall::LockOrientation(o) => Some(*o),
            _ => None,
        })
    }

    /// Whether the most recent fullscreen call enabled it
    pub fn is_fullscreen(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                DeviceCall::Fullscreen(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl DeviceControl for HeadlessDevice {
    fn lock_to_landscape(&mut self) {
        self.calls.push(DeviceCall::LockOrientation(Orientation::Landscape));
    }

    fn lock_to_portrait(&mut self) {
        self.calls.push(DeviceCall::LockOrientation(Orientation::Portrait));
    }

    fn set_fullscreen(&mut self, enabled: bool) {
        self.calls.push(DeviceCall::Fullscreen(enabled));
    }
}

/// Terminal stand-in for the device
///
/// Fullscreen maps to the alternate screen. A terminal has no orientation,
/// so lock requests are only logged and remembered.
pub struct TerminalDevice<W: Write> {
    out: W,
    orientation: Option<Orientation>,
    fullscreen: bool,
}

impl<W: Write> TerminalDevice<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            orientation: None,
            fullscreen: false,
        }
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

impl TerminalDevice<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> DeviceControl for TerminalDevice<W> {
    fn lock_to_landscape(&mut self) {
        tracing::info!("orientation locked to landscape");
        self.orientation = Some(Orientation::Landscape);
    }

    fn lock_to_portrait(&mut self) {
        tracing::info!("orientation locked to portrait");
        self.orientation = Some(Orientation::Portrait);
    }

    fn set_fullscreen(&mut self, enabled: bool) {
        let result = if enabled {
            execute!(self.out, EnterAlternateScreen, Hide)
        } else {
            execute!(self.out, LeaveAlternateScreen, Show)
        };
        match result {
            Ok(()) => {
                tracing::debug!(enabled, "fullscreen toggled");
                self.fullscreen = enabled;
            }
            Err(e) => tracing::warn!(enabled, "failed to toggle fullscreen: {}", e),
        }
    }
}
