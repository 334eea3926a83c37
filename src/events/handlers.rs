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

use anyhow::Result;
use tracing::{info, warn};

use crate::{App, controller::SeekOrigin, focus::InterruptionKind};

pub(super) fn handle_toggle_loop(app: &mut App) {
    let enabled = !app.controller.controls().loop_enabled;
    app.controller.set_loop(enabled);
}

pub(super) fn handle_seek_to(app: &mut App, position: u64) -> Result<()> {
    let position = i64::try_from(position).unwrap_or(i64::MAX);
    app.controller.on_seek_bar_moved(position, SeekOrigin::User)
}

pub(super) fn handle_interrupt(app: &mut App, kind: InterruptionKind) {
    let was_active = app.interrupter.active().is_some();

    match app.interrupter.toggle(kind) {
        Some(active) => {
            info!(?active, "Interruption started");
            app.controller.notify(active.label());
        }
        None if was_active => {
            info!("Interruption ended");
            app.controller.notify("Interruption ended");
        }
        None => app.controller.notify("Interruption refused"),
    }
}

pub(super) fn handle_error(app: &mut App, message: &str) {
    warn!("{}", message);
    app.controller.notify(message);
}
