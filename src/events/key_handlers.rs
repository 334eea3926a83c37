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

//! Keyboard and mouse input.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::{App, controller::SeekOrigin, events::AppEvent, focus::InterruptionKind};

/// Maps keyboard input to playback actions.
///
/// The command line gets the first look at every key, while it is open it
/// consumes all of them.
///
/// Keys are translated into events and posted back onto the channel, so
/// they take the same path as the equivalent commands.
///
/// # Errors
///
/// Returns an error if an event cannot be posted.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.commander.handle_event(&Event::Key(key), &app.event_tx) {
        return Ok(());
    }

    let fine_seek = app.config.fine_seek_ms;
    let seek = app.config.seek_ms;

    let event = match key.code {
        KeyCode::Char('q') => AppEvent::ExitApplication,

        KeyCode::Char(' ') => AppEvent::TogglePlay,
        KeyCode::Char('s') => AppEvent::Stop,
        KeyCode::Char('l') => AppEvent::ToggleLoop,

        KeyCode::Char(',') | KeyCode::Left => AppEvent::SeekBy(-fine_seek),
        KeyCode::Char('.') | KeyCode::Right => AppEvent::SeekBy(fine_seek),
        KeyCode::Char('<') => AppEvent::SeekBy(-seek),
        KeyCode::Char('>') => AppEvent::SeekBy(seek),
        KeyCode::Char('0') | KeyCode::Home => AppEvent::SeekTo(0),

        KeyCode::Char('i') => AppEvent::Interrupt(InterruptionKind::Call),
        KeyCode::Char('d') => AppEvent::Interrupt(InterruptionKind::Notification),
        KeyCode::Char('o') => AppEvent::Interrupt(InterruptionKind::OtherApp),

        _ => return Ok(()),
    };

    app.event_tx.send(event)?;

    Ok(())
}

/// Clicking or dragging on the seek bar moves it.
pub(super) fn process_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    if !matches!(
        mouse.kind,
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
    ) {
        return Ok(());
    }

    let max = app.controller.controls().seek_max;
    if let Some(position) = position_at(app.seek_area, mouse.column, mouse.row, max) {
        let position = i64::try_from(position).unwrap_or(i64::MAX);
        app.controller.on_seek_bar_moved(position, SeekOrigin::User)?;
    }

    Ok(())
}

/// The track position under a cell of the seek bar, `None` outside of it.
fn position_at(area: Rect, column: u16, row: u16, max: u64) -> Option<u64> {
    if area.width == 0 || row < area.y || row >= area.bottom() {
        return None;
    }
    if column < area.x || column >= area.right() {
        return None;
    }

    let offset = u64::from(column - area.x);
    let last = u64::from(area.width - 1).max(1);
    Some((max.saturating_mul(offset) / last).min(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR: Rect = Rect {
        x: 2,
        y: 5,
        width: 101,
        height: 1,
    };

    #[test]
    fn click_position_spans_the_track() {
        assert_eq!(position_at(BAR, 2, 5, 180_000), Some(0));
        assert_eq!(position_at(BAR, 52, 5, 180_000), Some(90_000));
        assert_eq!(position_at(BAR, 102, 5, 180_000), Some(180_000));
    }

    #[test]
    fn clicks_outside_the_bar_are_ignored() {
        assert_eq!(position_at(BAR, 1, 5, 180_000), None);
        assert_eq!(position_at(BAR, 103, 5, 180_000), None);
        assert_eq!(position_at(BAR, 10, 4, 180_000), None);
        assert_eq!(position_at(Rect::default(), 0, 0, 180_000), None);
    }
}
