//! Terminal UI for the player screen
//!
//! Built with ratatui. Keyboard stands in for touch.

pub mod player;
pub mod theme;

pub use player::render;
pub use theme::Theme;
