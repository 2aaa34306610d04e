//! Data structures shared by the player, the terminal UI and the CLI
//!
//! - **Status**: playback status and the resize (zoom) rendering hint
//! - **Events**: progress and load payloads reported by the media engine
//! - **Snapshot**: serializable copy of the controller state

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Playback Status
// =============================================================================

/// Playback status of the player screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    #[default]
    Paused,
    Playing,
    /// Stalled by the media engine, independent of user intent
    Buffering,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackStatus::Paused => write!(f, "⏸ Paused"),
            PlaybackStatus::Playing => write!(f, "▶ Playing"),
            PlaybackStatus::Buffering => write!(f, "Buffering..."),
        }
    }
}

// =============================================================================
// Resize Mode
// =============================================================================

/// How video content fills its display bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Fill the bounds, cropping as needed
    #[default]
    Cover,
    /// Actual size
    None,
}

impl ResizeMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ResizeMode::Cover => ResizeMode::None,
            ResizeMode::None => ResizeMode::Cover,
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizeMode::Cover => write!(f, "cover"),
            ResizeMode::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for ResizeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cover" | "fill" => Ok(ResizeMode::Cover),
            "none" | "actual" => Ok(ResizeMode::None),
            other => Err(format!("unknown resize mode: {}", other)),
        }
    }
}

// =============================================================================
// Orientation
// =============================================================================

/// Device orientation lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

// =============================================================================
// Media Event Payloads
// =============================================================================

/// Progress tick reported by the media engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current playback position in seconds
    pub current_time: f64,
    /// Furthest position a seek is currently valid for
    pub seekable_duration: f64,
}

impl ProgressUpdate {
    pub fn new(current_time: f64, seekable_duration: f64) -> Self {
        Self {
            current_time,
            seekable_duration,
        }
    }
}

/// Information reported once the media source has loaded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadInfo {
    /// Total duration in seconds
    pub duration: f64,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Point-in-time copy of the player state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub status: PlaybackStatus,
    pub position_seconds: f64,
    pub duration_seconds: f64,
    pub muted: bool,
    pub volume: f64,
    pub brightness: f64,
    pub zoom: ResizeMode,
    pub controls_visible: bool,
    pub track_menu_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlaybackSnapshot {
    /// Progress as a fraction (0.0-1.0)
    pub fn progress(&self) -> f64 {
        if self.duration_seconds > 0.0 && self.position_seconds.is_finite() {
            (self.position_seconds / self.duration_seconds).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Format position for display
    pub fn format_position(&self) -> String {
        format_duration(self.position_seconds)
    }

    /// Format duration for display
    pub fn format_duration(&self) -> String {
        format_duration(self.duration_seconds)
    }

    /// Format volume as percentage
    pub fn format_volume(&self) -> String {
        if self.muted {
            "muted".to_string()
        } else {
            format!("{}%", (self.volume * 100.0).round() as u8)
        }
    }
}

impl fmt::Display for PlaybackSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} / {} ({})",
            self.status,
            self.format_position(),
            self.format_duration(),
            self.format_volume()
        )
    }
}

/// Format seconds as `H:MM:SS`, or `M:SS` under an hour
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

// =============================================================================
// Tests
// =============================================================================
