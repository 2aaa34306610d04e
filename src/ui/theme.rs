//! Player theme
//!
//! Dark screen, white controls, red progress track.

use ratatui::style::{Color, Modifier, Style};

/// Player color palette
pub struct Theme;

impl Theme {
    /// Background: #000000
    pub const BACKGROUND: Color = Color::Rgb(0x00, 0x00, 0x00);

    /// Overlay behind visible controls: #141414
    pub const OVERLAY: Color = Color::Rgb(0x14, 0x14, 0x14);

    /// Accent: #e50914 (progress track, slider fill)
    pub const ACCENT: Color = Color::Rgb(0xe5, 0x09, 0x14);

    /// Text: #ffffff
    pub const TEXT: Color = Color::Rgb(0xff, 0xff, 0xff);

    /// Dim: #808080 (unfilled track, hints)
    pub const DIM: Color = Color::Rgb(0x80, 0x80, 0x80);

    /// Warning: #ffaa00 (buffering)
    pub const WARNING: Color = Color::Rgb(0xff, 0xaa, 0x00);

    /// Error: #ff4040
    pub const ERROR: Color = Color::Rgb(0xff, 0x40, 0x40);

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Movie title in the top bar
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn buffering() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Overlay panel shown while controls are visible
    pub fn overlay() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::OVERLAY)
    }

    /// Filled part of a track
    pub fn track_filled() -> Style {
        Style::default().fg(Self::ACCENT).bg(Self::OVERLAY)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }
}
