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

//! Command-line input logic and state management.
//!
//! This module implements a `:` command line: a text input component that,
//! when a command is submitted, dispatches the corresponding application
//! event. Every on-screen control has a command equivalent.

use std::sync::mpsc::Sender;

use crossterm::event::{Event, KeyCode};
use thiserror::Error;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{events::AppEvent, focus::InterruptionKind, util::format::parse_time};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Offers an input event to the command line.
    ///
    /// Returns `true` if the event was consumed, which is the case for every
    /// key while the command line is open.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.close();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                if !buffer.is_empty() {
                    let event = parse_command(&buffer)
                        .unwrap_or_else(|e| AppEvent::Error(e.to_string()));
                    let _ = event_tx.send(event);
                }
                self.close();
            }

            _ => {
                // Delegate all other key events to the managed input component
                self.input.handle_event(event);
            }
        }

        true
    }

    fn close(&mut self) {
        self.input.reset();
        self.active = false;
    }
}

/// Translates a command line into the event that carries it out.
pub(crate) fn parse_command(buffer: &str) -> Result<AppEvent, CommandError> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let event = match parts.as_slice() {
        ["q"] | ["quit"] => AppEvent::ExitApplication,

        ["play"] => AppEvent::SetPlaying(true),
        ["pause"] => AppEvent::SetPlaying(false),
        ["stop"] => AppEvent::Stop,

        ["loop"] => AppEvent::ToggleLoop,
        ["loop", "on"] => AppEvent::SetLoop(true),
        ["loop", "off"] => AppEvent::SetLoop(false),
        ["loop", other, ..] => return Err(CommandError::InvalidArgument(other.to_string())),

        ["seek"] => return Err(CommandError::MissingArgument("seek")),
        ["seek", time] => {
            let position = parse_time(time)
                .ok_or_else(|| CommandError::InvalidArgument(time.to_string()))?;
            AppEvent::SeekTo(position)
        }

        ["interrupt"] | ["interrupt", "call"] => AppEvent::Interrupt(InterruptionKind::Call),
        ["interrupt", "notify"] => AppEvent::Interrupt(InterruptionKind::Notification),
        ["interrupt", "app"] => AppEvent::Interrupt(InterruptionKind::OtherApp),
        ["interrupt", other, ..] => {
            return Err(CommandError::InvalidArgument(other.to_string()));
        }

        [cmd, ..] => return Err(CommandError::Unknown(cmd.to_string())),
        [] => return Err(CommandError::Unknown(String::new())),
    };

    Ok(event)
}
