//! UI rendering for the terminal interface.
//!
//! Everything here reads the [`App`] and draws; no state is mutated from
//! the draw path.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};
use crate::transport::PlaybackState;

/// Format a `Duration` as `m:ss`, truncating partial seconds.
fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// The `elapsed / total` clock line.
fn clock_line(elapsed: Duration, duration: Duration) -> String {
    format!("{} / {}", format_clock(elapsed), format_clock(duration))
}

/// Fill ratio for the timeline gauge, clamped into `[0, 1]`.
///
/// Elapsed time can overshoot the duration by up to one tick; the gauge
/// must never be asked for more than a full bar.
fn timeline_ratio(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

fn controls_text(controls: &ControlsSettings) -> String {
    [
        "[j/k] up/down".to_string(),
        "[gg/G] top/bottom".to_string(),
        "[enter] play selected".to_string(),
        "[space/p] play/pause".to_string(),
        "[x] stop".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] seek -/+{}s", controls.seek_seconds),
        "[r] repeat".to_string(),
        "[s] shuffle".to_string(),
        "[m] mute".to_string(),
        format!("[-/+] volume {}%", controls.volume_step),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings, controls: &ControlsSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" platter ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Min(1)])
        .split(chunks[1]);

    draw_track_list(frame, app, columns[0]);
    draw_player_panel(frame, app, ui_settings, columns[1]);

    let footer = Paragraph::new(controls_text(controls))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);
}

fn draw_track_list(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let items: Vec<ListItem> = app
        .library
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            if app.session.current == Some(i) {
                ListItem::new(format!("▶ {}", track.name))
                    .style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(format!("  {}", track.name))
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if app.has_tracks() {
        state.select(Some(app.selected.min(app.library.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_player_panel(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    area: ratatui::layout::Rect,
) {
    let session = &app.session;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    // Title line: error notice wins, then the playing track, then idle text.
    let title_line = if let Some(notice) = &session.notice {
        Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if let Some(track) = session.current.and_then(|i| app.library.get(i)) {
        Line::from(format!("Playing: {}", track.name))
    } else {
        Line::from(ui_settings.idle_text.clone())
    };

    let pause_glyph = match session.state {
        PlaybackState::Playing => "||",
        PlaybackState::Paused | PlaybackState::Idle => ">",
    };
    let mute_glyph = if session.muted { "🔇" } else { "🔈" };

    let flag = |name: &str, own: bool, blocked_by_sibling: bool| -> Span<'static> {
        let text = format!("{name}: {}", if own { "ON" } else { "OFF" });
        if blocked_by_sibling {
            Span::styled(text, Style::default().add_modifier(Modifier::DIM))
        } else {
            Span::raw(text)
        }
    };

    let lines = vec![
        title_line,
        Line::from(format!("State: [{pause_glyph}]")),
        Line::from(""),
        Line::from(format!("Artist: {}", session.tags.artist)),
        Line::from(format!("Album: {}", session.tags.album)),
        Line::from(format!("Year: {}", session.tags.year)),
        Line::from(""),
        Line::from(vec![
            // The active flag dims its mutually-exclusive sibling.
            flag("Repeat", session.repeat, session.shuffle),
            Span::raw("   "),
            flag("Shuffle", session.shuffle, session.repeat),
        ]),
        Line::from(format!("{mute_glyph} Volume: {}%", session.volume)),
        Line::from(""),
        Line::from(format!("Dir: {}", app.root_display)),
    ];

    let panel = Paragraph::new(lines)
        .block(
            Block::bordered().title(" now playing ").padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, rows[0]);

    let timeline = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" timeline "))
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(timeline_ratio(session.elapsed, session.duration))
        .label(clock_line(session.elapsed, session.duration));
    frame.render_widget(timeline, rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_truncates_partial_seconds() {
        assert_eq!(format_clock(Duration::from_secs_f64(125.7)), "2:05");
        assert_eq!(format_clock(Duration::from_secs(0)), "0:00");
        assert_eq!(format_clock(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn clock_line_floors_both_sides() {
        assert_eq!(
            clock_line(Duration::from_secs_f64(59.99), Duration::from_secs(60)),
            "0:59 / 1:00"
        );
    }

    #[test]
    fn timeline_ratio_is_clamped() {
        let d = Duration::from_secs(10);
        assert_eq!(timeline_ratio(Duration::ZERO, d), 0.0);
        assert_eq!(timeline_ratio(Duration::from_secs(5), d), 0.5);
        // One tick of overshoot must not push the gauge past full.
        assert_eq!(timeline_ratio(Duration::from_millis(10_500), d), 1.0);
        assert_eq!(timeline_ratio(Duration::from_secs(3), Duration::ZERO), 0.0);
    }
}
