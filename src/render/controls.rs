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

//! Render the playback buttons.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{
    App,
    render::icons::{ICON_LOOP, ICON_PAUSE, ICON_PLAY, ICON_STOP},
    theme::Theme,
};

pub(crate) fn draw_controls(f: &mut Frame, area: Rect, app: &App) {
    let controls = app.controller.controls();
    let theme = &app.theme;

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14); 3])
        .flex(Flex::Center)
        .spacing(2)
        .split(area);

    let play = if controls.play_pressed {
        format!("{} Pause", ICON_PAUSE)
    } else {
        format!("{} Play", ICON_PLAY)
    };

    draw_button(f, buttons[0], theme, &play, controls.play_pressed);
    draw_button(f, buttons[1], theme, &format!("{} Stop", ICON_STOP), false);
    draw_button(
        f,
        buttons[2],
        theme,
        &format!("{} Loop", ICON_LOOP),
        controls.loop_enabled,
    );
}

/// A toggle button, pressed buttons are filled in.
fn draw_button(f: &mut Frame, area: Rect, theme: &Theme, label: &str, pressed: bool) {
    let (fg, bg, border) = if pressed {
        (theme.background_colour, theme.pressed_colour, theme.pressed_colour)
    } else {
        (theme.text_colour, Color::Reset, theme.border_colour)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));

    let mut style = Style::default().fg(fg);
    if pressed {
        style = style.bg(bg).add_modifier(Modifier::BOLD);
    }

    f.render_widget(
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(style)
            .block(block),
        area,
    );
}
