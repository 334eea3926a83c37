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

//! MPV-backed audio playback engine and event processing.
//!
//! This module provides the [`MediaPlayer`] implementation, leveraging
//! `libmpv` for audio decoding and output. It manages a background worker
//! thread that bridges the gap between the controller's synchronous calls and
//! the low-level MPV property observation system.
//!
//! # Architecture
//!
//! The engine operates using a dual-channel communication pattern:
//! 1. **Command Channel**: Receives [`PlayerCommand`]s from the
//!    [`MpvPlayer`] handle (start, pause, seek, shutdown).
//! 2. **Event Channel**: Broadcasts [`AppEvent`]s to notify the application
//!    of the track duration and of the end of the track.
//!
//! Position and duration are additionally written into a shared
//! [`PlaybackClock`] so the controller can read them without a round trip to
//! the worker.

use anyhow::{Context, Result};
use mpv::Format;
use std::{
    sync::{
        Arc, Mutex,
        mpsc::{self, Receiver, Sender, TryRecvError},
    },
    thread,
};
use tracing::{debug, info};

use crate::{
    events::AppEvent,
    player::{MediaPlayer, PlayerError, TrackInfo},
};

#[derive(Debug)]
enum PlayerCommand {
    Start,
    Pause,
    SeekTo(u64),
    Shutdown,
}

#[derive(Debug, Default)]
struct PlaybackClock {
    position_ms: u64,
    duration_ms: u64,
}

type SharedClock = Arc<Mutex<PlaybackClock>>;

/// A handle to the MPV playback engine bound to one file.
///
/// This struct acts as a command proxy; it does not perform audio processing
/// itself but instead sends instructions to a background worker thread.
pub(crate) struct MpvPlayer {
    command_tx: Option<Sender<PlayerCommand>>,
    clock: SharedClock,
}

impl MpvPlayer {
    /// Spawns the audio worker thread, loads the track paused, and returns a
    /// new player handle.
    ///
    /// # Arguments
    ///
    /// * `track` - The track to bind the player to.
    /// * `event_tx` - A channel to send application-level events (duration,
    ///   end of track, worker failure) back to the main event loop.
    pub(crate) fn create(track: &TrackInfo, event_tx: Sender<AppEvent>) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();

        let clock = Arc::new(Mutex::new(PlaybackClock {
            position_ms: 0,
            duration_ms: track.duration_ms,
        }));

        spawn_player_worker(
            track.filename.clone(),
            command_rx,
            Arc::clone(&clock),
            event_tx,
        );

        Self {
            command_tx: Some(command_tx),
            clock,
        }
    }

    fn send(&self, command: PlayerCommand) -> Result<(), PlayerError> {
        let tx = self.command_tx.as_ref().ok_or(PlayerError::Disconnected)?;
        tx.send(command).map_err(|_| PlayerError::Disconnected)
    }

    fn read_clock<T>(&self, f: impl FnOnce(&PlaybackClock) -> T) -> T {
        let clock = self.clock.lock().unwrap_or_else(|e| e.into_inner());
        f(&clock)
    }
}

impl MediaPlayer for MpvPlayer {
    fn start(&mut self) -> Result<(), PlayerError> {
        self.send(PlayerCommand::Start)
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.send(PlayerCommand::Pause)
    }

    fn seek_to(&mut self, position_ms: u64) -> Result<(), PlayerError> {
        self.send(PlayerCommand::SeekTo(position_ms))?;
        // Report the new position straight away rather than waiting for the
        // next time-pos change
        self.clock.lock().unwrap_or_else(|e| e.into_inner()).position_ms = position_ms;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.read_clock(|c| c.position_ms)
    }

    fn duration(&self) -> u64 {
        self.read_clock(|c| c.duration_ms)
    }

    fn release(&mut self) {
        if let Some(tx) = self.command_tx.take() {
            let _ = tx.send(PlayerCommand::Shutdown);
            info!("Player released");
        }
    }
}

impl Drop for MpvPlayer {
    fn drop(&mut self) {
        self.release();
    }
}

/// Spawns the audio worker thread to process playback commands.
///
/// If the internal worker returns an error, it is caught here and broadcast as
/// a fatal application event.
fn spawn_player_worker(
    filename: String,
    command_rx: Receiver<PlayerCommand>,
    clock: SharedClock,
    event_tx: Sender<AppEvent>,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = audio_player_worker(&filename, command_rx, clock, event_tx) {
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

/// State private to the worker, derived from observed MPV properties.
#[derive(Default)]
struct WorkerState {
    eof_reached: bool,
}

impl WorkerState {
    /// Whether a start must go back to the beginning first, which is only
    /// the case while parked at the end of the file.
    fn take_rewind(&mut self) -> bool {
        std::mem::take(&mut self.eof_reached)
    }

    /// An explicit seek leaves the end of the file, even before MPV reports
    /// `eof-reached` going false.
    fn seeked(&mut self) {
        self.eof_reached = false;
    }
}

/// The primary execution loop for the audio player backend.
///
/// This function initializes a local `libmpv` context, loads the file in a
/// paused state, and alternates between draining commands and waiting for
/// MPV events until it is told to shut down or the handle goes away.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize, if the file
/// cannot be loaded, or if a command is rejected by MPV.
fn audio_player_worker(
    filename: &str,
    command_rx: Receiver<PlayerCommand>,
    clock: SharedClock,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        // Stay on the last frame at the end of the file, so that the track
        // remains loaded and can be restarted or seeked
        builder
            .set_option("keep-open", "yes")
            .context("Failed to set keep-open")?;
        builder
            .set_option("pause", "yes")
            .context("Failed to set initial pause")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;
    handler
        .observe_property::<bool>("eof-reached", 0)
        .context("Failed to observe eof-reached")?;

    handler
        .command(&["loadfile", filename, "replace"])
        .with_context(|| format!("Failed to load file: {}", filename))?;

    info!(file = filename, "Player created");

    let mut state = WorkerState::default();

    while process_commands(&mut handler, &command_rx, &mut state)? {
        process_mpv_events(&mut handler, &mut state, &clock, &event_tx)?;
    }

    debug!("Player worker finished");

    Ok(())
}

/// Drains and executes all pending commands from the player handle.
///
/// Returns `false` once the worker should stop.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &Receiver<PlayerCommand>,
    state: &mut WorkerState,
) -> Result<bool> {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(TryRecvError::Empty) => return Ok(true),
            Err(TryRecvError::Disconnected) => return Ok(false),
        };

        debug!(?command, "Player command");

        match command {
            PlayerCommand::Start => {
                if state.take_rewind() {
                    handler
                        .command(&["seek", "0", "absolute"])
                        .context("Failed to rewind")?;
                }
                handler
                    .set_property("pause", false)
                    .context("Failed to unpause")?;
            }
            PlayerCommand::Pause => {
                handler
                    .set_property("pause", true)
                    .context("Failed to pause")?;
            }
            PlayerCommand::SeekTo(position_ms) => {
                let seconds = format!("{:.3}", position_ms as f64 / 1000.0);
                handler
                    .command(&["seek", &seconds, "absolute"])
                    .context("Failed to seek")?;
                state.seeked();
            }
            PlayerCommand::Shutdown => return Ok(false),
        }
    }
}

/// Polls for MPV events and synchronizes the shared clock.
///
/// This function waits for up to 50ms for an event from the MPV context.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    state: &mut WorkerState,
    clock: &SharedClock,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    let Some(mpv::Event::PropertyChange { name, change, .. }) = handler.wait_event(0.05) else {
        return Ok(());
    };

    let app_event = match (name, change) {
        ("duration", Format::Double(seconds)) if seconds >= 0.0 => {
            let duration_ms = (seconds * 1000.0) as u64;
            clock.lock().unwrap_or_else(|e| e.into_inner()).duration_ms = duration_ms;
            Some(AppEvent::DurationChanged(duration_ms))
        }
        ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
            clock.lock().unwrap_or_else(|e| e.into_inner()).position_ms =
                (seconds * 1000.0) as u64;
            None
        }
        ("eof-reached", Format::Flag(eof)) => {
            let finished = eof && !state.eof_reached;
            state.eof_reached = eof;
            finished.then_some(AppEvent::TrackFinished)
        }
        _ => None,
    };

    if let Some(event) = app_event {
        event_tx.send(event).context("Failed to send event")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_at_end_rewinds_once() {
        let mut state = WorkerState { eof_reached: true };

        assert!(state.take_rewind());
        assert!(!state.take_rewind());
    }

    #[test]
    fn seek_at_end_is_not_undone_by_start() {
        let mut state = WorkerState { eof_reached: true };

        state.seeked();

        assert!(!state.take_rewind());
    }
}
