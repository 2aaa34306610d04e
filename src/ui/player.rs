//! Player screen rendering
//!
//! Status is always drawn. The back button, title, transport, sliders and
//! the zoom/track row only appear while the control overlay is visible.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::app::PlayerScreen;
use crate::models::{PlaybackSnapshot, PlaybackStatus, ResizeMode};
use crate::player::DeviceControl;
use crate::ui::Theme;

/// Render the whole player screen
pub fn render<D: DeviceControl>(frame: &mut Frame, screen: &PlayerScreen<D>) {
    let area = frame.area();
    let snapshot = screen.player().snapshot();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Theme::text()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Top bar
            Constraint::Min(3),    // Video surface
            Constraint::Length(3), // Scrubber
            Constraint::Length(1), // Control row
        ])
        .split(area);

    render_top_bar(frame, chunks[0], &screen.title, &snapshot);
    render_surface(frame, chunks[1], &snapshot);

    if snapshot.controls_visible {
        render_scrubber(frame, chunks[2], &snapshot);
        render_control_row(frame, chunks[3], &snapshot);
    } else {
        let hint = Paragraph::new(Line::from(vec![
            Span::styled(" ENTER ", Theme::keybind()),
            Span::styled("show controls", Theme::dimmed()),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[3]);
    }

    if snapshot.track_menu_visible {
        render_track_menu(frame, area);
    }

    if let Some(message) = snapshot.error.as_deref().or(screen.error.as_deref()) {
        render_error_popup(frame, area, message);
    }
}

fn render_top_bar(frame: &mut Frame, area: Rect, title: &str, snapshot: &PlaybackSnapshot) {
    let status_style = match snapshot.status {
        PlaybackStatus::Buffering => Theme::buffering(),
        _ => Theme::dimmed(),
    };
    let mut spans = Vec::with_capacity(4);
    if snapshot.controls_visible {
        spans.push(Span::styled(" ← ", Theme::keybind()));
        spans.push(Span::styled(title.to_string(), Theme::title()));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(snapshot.status.to_string(), status_style));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_surface(frame: &mut Frame, area: Rect, snapshot: &PlaybackSnapshot) {
    let style = if snapshot.controls_visible {
        Theme::overlay()
    } else {
        Theme::text()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .style(style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let center = match snapshot.status {
        PlaybackStatus::Buffering => Span::styled("⟳ Buffering...", Theme::buffering()),
        PlaybackStatus::Paused if snapshot.controls_visible => {
            Span::styled("◀◀   ▶   ▶▶", Theme::title())
        }
        PlaybackStatus::Playing if snapshot.controls_visible => {
            Span::styled("◀◀   ⏸   ▶▶", Theme::title())
        }
        _ => Span::raw(""),
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);
    frame.render_widget(Paragraph::new(center).alignment(Alignment::Center), rows[1]);
}

fn render_scrubber(frame: &mut Frame, area: Rect, snapshot: &PlaybackSnapshot) {
    let label = format!(
        "{} / {}",
        snapshot.format_position(),
        snapshot.format_duration()
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::TOP).border_style(Theme::border()))
        .gauge_style(Theme::track_filled())
        .ratio(snapshot.progress())
        .label(Span::styled(label, Theme::title()));
    frame.render_widget(gauge, area);
}

fn render_control_row(frame: &mut Frame, area: Rect, snapshot: &PlaybackSnapshot) {
    let volume_icon = if snapshot.muted { "🔇" } else { "🔊" };
    let zoom_label = match snapshot.zoom {
        ResizeMode::Cover => "⛶ fill",
        ResizeMode::None => "⛶ actual",
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", volume_icon), Theme::text()),
        Span::styled(snapshot.format_volume(), Theme::text()),
        Span::raw("  "),
        Span::styled(
            format!("☀ {}%", (snapshot.brightness * 100.0).round() as u8),
            Theme::text(),
        ),
        Span::raw("  "),
        Span::styled(zoom_label, Theme::text()),
        Span::raw("  │ "),
        Span::styled("SPACE", Theme::keybind()),
        Span::styled(" play  ", Theme::dimmed()),
        Span::styled("←→", Theme::keybind()),
        Span::styled(" seek  ", Theme::dimmed()),
        Span::styled("m", Theme::keybind()),
        Span::styled(" mute  ", Theme::dimmed()),
        Span::styled("z", Theme::keybind()),
        Span::styled(" zoom  ", Theme::dimmed()),
        Span::styled("t", Theme::keybind()),
        Span::styled(" audio & subtitles", Theme::dimmed()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Centered rect of at most `width` x `height` inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn render_track_menu(frame: &mut Frame, area: Rect) {
    let popup = centered(area, 40, 6);
    frame.render_widget(Clear, popup);

    let menu = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" ENTER ", Theme::keybind()),
            Span::styled("apply", Theme::dimmed()),
            Span::raw("   "),
            Span::styled(" ESC ", Theme::keybind()),
            Span::styled("cancel", Theme::dimmed()),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border())
            .title(Span::styled(" Audio & Subtitles ", Theme::title()))
            .style(Theme::overlay()),
    );
    frame.render_widget(menu, popup);
}

fn render_error_popup(frame: &mut Frame, area: Rect, message: &str) {
    let popup = centered(area, 60, 5);
    frame.render_widget(Clear, popup);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Theme::text()),
    );
    frame.render_widget(error_block, popup);
}
