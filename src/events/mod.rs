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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging the gap between user input (keyboard, mouse, command line),
//! background notifications (position timer, audio player, focus arbiter),
//! and the UI rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through an
//!    `mpsc` channel, fed by the input, tick, timer and player threads.
//! 2. **Process**: The [`process_events`] function dispatches each event to
//!    the playback controller, on the main thread only.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!    `ratatui` terminal.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::{process_key_event, process_mouse_event};

use std::io::Stdout;

use anyhow::{Result, anyhow};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::error;

use crate::{
    App,
    focus::{FocusChange, InterruptionKind},
    render::draw,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),

    SetPlaying(bool),
    TogglePlay,
    Stop,
    SetLoop(bool),
    ToggleLoop,
    SeekTo(u64),
    SeekBy(i64),

    Interrupt(InterruptionKind),

    ReportPosition,
    DurationChanged(u64),
    TrackFinished,
    FocusChanged(FocusChange),

    Tick,

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
///
/// # Errors
///
/// Returns an error if the player rejects a command, if the terminal cannot
/// be drawn, or when a background worker reports a fatal error.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => break,
            AppEvent::FatalError(message) => {
                error!("{}", message);
                return Err(anyhow!(message));
            }
            event => dispatch_event(app, event)?,
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Applies a single event to the application state.
pub(crate) fn dispatch_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::Mouse(mouse) => process_mouse_event(app, mouse)?,
        AppEvent::SetPlaying(pressed) => app.controller.on_play_toggled(pressed)?,
        AppEvent::TogglePlay => app.controller.toggle_play()?,
        AppEvent::Stop => app.controller.stop()?,
        AppEvent::SetLoop(enabled) => app.controller.set_loop(enabled),
        AppEvent::ToggleLoop => handle_toggle_loop(app),
        AppEvent::SeekTo(position) => handle_seek_to(app, position)?,
        AppEvent::SeekBy(delta) => app.controller.seek_by(delta)?,
        AppEvent::Interrupt(kind) => handle_interrupt(app, kind),
        AppEvent::ReportPosition => app.controller.report_position()?,
        AppEvent::DurationChanged(duration) => app.controller.set_duration(duration),
        AppEvent::TrackFinished => app.controller.on_completion()?,
        AppEvent::FocusChanged(change) => app.controller.on_focus_change(change)?,
        AppEvent::Error(message) => handle_error(app, &message),
        AppEvent::Tick | AppEvent::ExitApplication | AppEvent::FatalError(_) => {}
    }

    Ok(())
}
