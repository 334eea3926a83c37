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

//! # Single Track Player TUI.
//!
//! A terminal player for exactly one audio file, with play/pause, stop,
//! loop and seek controls, that cooperates with other audio producers
//! through an audio focus arbiter.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** owns the playback controller, manages the terminal
//!   lifecycle and renders the UI.
//! * A **Player Worker** drives `libmpv` and reports duration and end of
//!   track.
//! * A **Position Timer** periodically asks the controller to refresh the
//!   seek bar while playing.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Every
//! background thread talks to the main thread through a single
//! `std::sync::mpsc` channel, so all controller state is touched from one
//! thread only.

mod commander;
mod config;
mod controller;
mod events;
mod focus;
mod logging;
mod player;
mod render;
mod theme;
mod util;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::{
    io::{self},
    path::PathBuf,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing::{info, warn};

use crate::{
    commander::Commander,
    config::AppConfig,
    controller::PlaybackController,
    events::{AppEvent, process_events},
    focus::{FocusArbiter, FocusClient, Interrupter},
    player::{MpvPlayer, TrackInfo},
    theme::Theme,
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the audio file to play, overrides the configured track
    track: Option<PathBuf>,

    /// Write the log to this file instead of the default location
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub controller: PlaybackController<MpvPlayer, FocusClient>,
    pub interrupter: Interrupter,

    pub track: TrackInfo,

    pub commander: Commander,

    /// Where the seek bar was last drawn, for mapping mouse clicks.
    pub seek_area: Rect,
}

impl App {
    /// Create a new instance of application state bound to a single track.
    pub fn new(config: AppConfig, track_path: PathBuf) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let track = TrackInfo::probe(&track_path)?;
        info!(title = %track.title, duration_ms = track.duration_ms, "Loaded track");

        let arbiter = FocusArbiter::new();

        let focus_event_tx = event_tx.clone();
        let focus = arbiter.client("player", move |change| {
            focus_event_tx.send(AppEvent::FocusChanged(change)).ok();
        });

        let interrupter = Interrupter::new(&arbiter);

        let player = MpvPlayer::create(&track, event_tx.clone());

        let controller = PlaybackController::new(
            Some(player),
            focus,
            event_tx.clone(),
            Duration::from_millis(config.report_interval_ms.max(1)),
        );

        Ok(Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            controller,
            interrupter,
            track,
            commander: Commander::new(),
            seek_area: Rect::default(),
        })
    }
}

/// The entry point of the application.
///
/// Parses the command line, initialises logging and configuration, manages
/// the terminal lifecycle, and returns an error if any part of the execution
/// fails.
fn main() -> Result<()> {
    let args = Args::parse();

    let config_result = config::load_config();

    let log_path = args
        .log_file
        .clone()
        .or_else(|| {
            config_result
                .as_ref()
                .ok()
                .and_then(|c| c.log_file.as_ref().map(PathBuf::from))
        })
        .unwrap_or_else(logging::default_log_path);
    logging::init(&log_path)?;

    let config = config_result.unwrap_or_else(|e| {
        warn!("Failed to load configuration, using defaults: {}", e);
        AppConfig::default()
    });

    let track_path = args
        .track
        .or_else(|| config.track.as_ref().map(PathBuf::from))
        .ok_or_else(|| anyhow!("No track given, pass a file or set one in the configuration"))?;

    let mut app = App::new(config, track_path).context("Failed to initialise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    app.controller.teardown();
    info!("Exiting");

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
/// * Enables mouse capture so the seek bar can be clicked.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex).ok();
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It is best-effort
/// and does not return a result.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg().ok();
    terminal.show_cursor().ok();
}

/// Starts the input and tick threads and enters the main event loop.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw terminal events to application events.
    let tx_input = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(event::Event::Key(key)) => AppEvent::Key(key),
                Ok(event::Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx_input.send(event).is_err() {
                break;
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application,
    // and is what expires notices.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(Duration::from_millis(250));
        }
    });

    process_events(terminal, app)
}
