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

//! Render the footer line.
//!
//! The footer shows the command line while it is open, otherwise the most
//! recent notice until it expires, otherwise a summary of the keys.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

const KEY_HELP: &[(&str, &str)] = &[
    ("space", "play/pause"),
    ("s", "stop"),
    ("l", "loop"),
    (", .", "seek"),
    ("i d o", "interrupt"),
    (":", "command"),
    ("q", "quit"),
];

pub(crate) fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;

    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    if commander.active() {
        f.render_widget(
            Paragraph::new(format!(":{}", commander.input.value())).style(
                Style::default()
                    .fg(app.theme.commander_colour)
                    .bg(app.theme.gauge_track_colour),
            ),
            container[0],
        );

        // Account for the prompt
        let cursor_x = container[0].x + 1 + commander.input.cursor() as u16;
        let cursor_y = container[0].y;
        f.set_cursor_position((cursor_x, cursor_y));
        return;
    }

    if let Some(notice) = app.controller.notice(Instant::now()) {
        f.render_widget(
            Paragraph::new(notice.message.as_str()).style(
                Style::default()
                    .fg(app.theme.notice_colour)
                    .add_modifier(Modifier::BOLD),
            ),
            container[0],
        );
        return;
    }

    let mut spans = Vec::new();
    for (key, action) in KEY_HELP {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(app.theme.accent_colour)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(app.theme.muted_colour),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), container[0]);
}
