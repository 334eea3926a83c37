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

//! Audio playback for a single track.
//!
//! This module defines the [`MediaPlayer`] interface used by the playback
//! controller, together with the MPV implementation in [`mpv`] and the tag
//! reading in [`track`].
//!
//! A player is bound to one audio file for its whole life. When the end of
//! the track is reached the player does not call back into the controller,
//! it posts a `TrackFinished` event on the application channel instead.

mod mpv;
mod track;

pub(crate) use mpv::MpvPlayer;
pub(crate) use track::TrackInfo;

use thiserror::Error;

/// Represents the current playback status as seen by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlayerState {
    Idle,
    Playing,
    Paused,
    Stopped,
}

#[derive(Debug, Error)]
pub(crate) enum PlayerError {
    #[error("audio worker is no longer running")]
    Disconnected,
}

/// A decoded audio resource bound to a fixed source.
///
/// All positions and durations are in milliseconds.
pub(crate) trait MediaPlayer {
    /// Starts, or resumes, playback.
    ///
    /// If the end of the track was reached playback restarts from the
    /// beginning.
    fn start(&mut self) -> Result<(), PlayerError>;

    fn pause(&mut self) -> Result<(), PlayerError>;

    /// Jumps to an absolute position.
    fn seek_to(&mut self, position_ms: u64) -> Result<(), PlayerError>;

    fn position(&self) -> u64;

    /// The track length, zero if it is not known (yet).
    fn duration(&self) -> u64;

    /// Frees the underlying audio resource, the player must not be used
    /// afterwards.
    fn release(&mut self);
}
