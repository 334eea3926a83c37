// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Render the now-playing panel.
//!
//! This module renders the current track, the seek bar and the playback
//! times.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    player::PlayerState,
    render::icons::{ICON_IDLE, ICON_NO_FOCUS, ICON_PAUSE, ICON_PLAY, ICON_STOP},
    util,
};

/// Renders the track details, seek bar and times.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(chunks[0]);

    let theme = app.theme;
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let icon = match app.controller.state() {
        PlayerState::Idle => ICON_IDLE,
        PlayerState::Playing => ICON_PLAY,
        PlayerState::Paused => ICON_PAUSE,
        PlayerState::Stopped => ICON_STOP,
    };

    let mut track_line = vec![
        Span::styled(format!(" {} ", icon), bold).fg(theme.text_colour),
        Span::styled(app.track.title.as_str(), bold).fg(theme.accent_colour),
    ];
    if let Some(artist) = &app.track.artist {
        track_line.push(Span::raw(" by ").fg(theme.text_colour));
        track_line.push(Span::styled(artist.as_str(), bold).fg(theme.accent_colour));
    }
    f.render_widget(Paragraph::new(Line::from(track_line)), info_chunks[0]);

    let controls = app.controller.controls();
    let duration = controls.seek_max;
    let time = controls.seek_position;
    let remaining = duration.saturating_sub(time);

    let time_line = Line::from(vec![
        Span::styled(util::format::format_time(time), bold).fg(theme.accent_colour),
        Span::styled(" / ", bold).fg(theme.text_colour),
        Span::styled(util::format::format_time(duration), bold).fg(theme.accent_colour),
        Span::styled(" (-", bold).fg(theme.text_colour),
        Span::styled(util::format::format_time(remaining), bold).fg(theme.accent_colour),
        Span::styled(")", bold).fg(theme.text_colour),
    ]);
    f.render_widget(
        Paragraph::new(time_line).alignment(Alignment::Right),
        info_chunks[1],
    );

    let ratio = if duration > 0 {
        (time as f64 / duration as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.accent_colour)
                .bg(theme.gauge_track_colour),
        )
        .ratio(ratio)
        .label("")
        .use_unicode(true);

    app.seek_area = chunks[2];
    f.render_widget(position_gauge, chunks[2]);

    let mut status = Vec::new();
    if !app.controller.has_focus_token() {
        status.push(Span::raw(format!("{} no audio focus", ICON_NO_FOCUS)).fg(theme.muted_colour));
    }
    if let Some(kind) = app.interrupter.active() {
        if !status.is_empty() {
            status.push(Span::raw("  "));
        }
        status.push(Span::styled(kind.label(), bold).fg(theme.notice_colour));
    }
    f.render_widget(Paragraph::new(Line::from(status)), chunks[3]);
}
