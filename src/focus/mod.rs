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

//! Audio focus arbitration.
//!
//! Audio focus is the right to produce audio on the shared output device.
//! Consumers ask an arbiter for focus before they start playing, and the
//! arbiter tells them (through a listener) when some other consumer has taken
//! the focus away from them, or when it has been handed back.
//!
//! The [`AudioFocus`] trait is the seam used by the playback controller, the
//! in-process implementation lives in [`arbiter`].

mod arbiter;
mod interruption;

use std::sync::Arc;

pub(crate) use arbiter::{FocusArbiter, FocusClient};
pub(crate) use interruption::{Interrupter, InterruptionKind};

/// The kind of audio a focus request is made for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StreamType {
    Music,
    Notification,
    VoiceCall,
}

/// How long, and how exclusively, focus is requested for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FocusGain {
    /// Focus for an unknown, usually long, duration.
    Gain,
    /// Short-lived focus, the previous holder is expected to resume after.
    GainTransient,
    /// Short-lived focus during which nobody else may be granted focus.
    GainTransientExclusive,
    /// Short-lived focus, the previous holder may keep playing quietly.
    GainTransientMayDuck,
}

impl FocusGain {
    /// The change delivered to the holder that loses focus to this request.
    pub(crate) fn loss(self) -> FocusChange {
        match self {
            FocusGain::Gain => FocusChange::Loss,
            FocusGain::GainTransient | FocusGain::GainTransientExclusive => {
                FocusChange::LossTransient
            }
            FocusGain::GainTransientMayDuck => FocusChange::LossTransientCanDuck,
        }
    }
}

/// A focus change notification delivered to a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FocusChange {
    Gain,
    Loss,
    LossTransient,
    LossTransientCanDuck,
}

/// Outcome of a focus request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FocusRequestResult {
    Granted,
    Denied,
}

/// Listener invoked by the arbiter whenever the focus of a client changes.
pub(crate) type FocusListener = Arc<dyn Fn(FocusChange) + Send + Sync>;

/// Access to an audio focus arbiter on behalf of a single consumer.
pub(crate) trait AudioFocus {
    /// Asks for focus, the listener registered with the consumer is notified
    /// of any subsequent change.
    fn request_focus(&self, stream: StreamType, gain: FocusGain) -> FocusRequestResult;

    /// Gives the focus up (or withdraws a pending claim on it).
    ///
    /// Calling this without holding focus is a no-op.
    fn abandon_focus(&self);

    /// Whether the consumer is the current focus holder.
    fn has_focus(&self) -> bool;
}
