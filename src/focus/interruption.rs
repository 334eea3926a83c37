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

//! Simulated competing audio sources.
//!
//! There is nothing else on a desktop that competes for focus on our
//! arbiter, so the user can stand in for one: an incoming call, a short
//! notification, or another application that takes over the output.

use tracing::info;

use crate::focus::{
    AudioFocus, FocusArbiter, FocusClient, FocusGain, FocusRequestResult, StreamType,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InterruptionKind {
    Call,
    Notification,
    OtherApp,
}

impl InterruptionKind {
    fn request(self) -> (StreamType, FocusGain) {
        match self {
            InterruptionKind::Call => (StreamType::VoiceCall, FocusGain::GainTransientExclusive),
            InterruptionKind::Notification => {
                (StreamType::Notification, FocusGain::GainTransientMayDuck)
            }
            InterruptionKind::OtherApp => (StreamType::Music, FocusGain::Gain),
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            InterruptionKind::Call => "Incoming call",
            InterruptionKind::Notification => "Notification",
            InterruptionKind::OtherApp => "Another app is playing",
        }
    }
}

/// A focus client that plays the part of some other audio source.
pub(crate) struct Interrupter {
    client: FocusClient,
    active: Option<InterruptionKind>,
}

impl Interrupter {
    pub(crate) fn new(arbiter: &FocusArbiter) -> Self {
        Self {
            client: arbiter.client("interrupter", |change| {
                info!(?change, "Interrupter focus changed");
            }),
            active: None,
        }
    }

    /// The interruption in progress, one that has since lost the focus to
    /// somebody else no longer counts.
    pub(crate) fn active(&self) -> Option<InterruptionKind> {
        self.active.filter(|_| self.client.has_focus())
    }

    /// Starts the interruption, or ends the one in progress.
    ///
    /// Returns the interruption now in progress, if any.
    pub(crate) fn toggle(&mut self, kind: InterruptionKind) -> Option<InterruptionKind> {
        let in_progress = self.active().is_some();
        if self.active.take().is_some() {
            self.client.abandon_focus();
            if in_progress {
                return None;
            }
        }

        let (stream, gain) = kind.request();
        if self.client.request_focus(stream, gain) == FocusRequestResult::Granted {
            self.active = Some(kind);
        }
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::FocusChange;
    use std::sync::{Arc, Mutex};

    #[test]
    fn call_interrupts_and_returns_focus() {
        let arbiter = FocusArbiter::new();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        let player = arbiter.client("player", move |c| sink.lock().unwrap().push(c));
        let mut interrupter = Interrupter::new(&arbiter);

        player.request_focus(StreamType::Music, FocusGain::Gain);
        assert_eq!(
            interrupter.toggle(InterruptionKind::Call),
            Some(InterruptionKind::Call)
        );
        assert_eq!(
            player.request_focus(StreamType::Music, FocusGain::Gain),
            FocusRequestResult::Denied
        );
        assert_eq!(interrupter.toggle(InterruptionKind::Call), None);

        assert_eq!(
            *changes.lock().unwrap(),
            vec![FocusChange::LossTransient, FocusChange::Gain]
        );
    }

    #[test]
    fn second_toggle_ends_any_interruption() {
        let arbiter = FocusArbiter::new();
        let mut interrupter = Interrupter::new(&arbiter);

        interrupter.toggle(InterruptionKind::OtherApp);
        assert_eq!(interrupter.toggle(InterruptionKind::Notification), None);
        assert_eq!(interrupter.active(), None);
    }

    #[test]
    fn interruption_taken_over_by_the_player_is_over() {
        let arbiter = FocusArbiter::new();
        let player = arbiter.client("player", |_| {});
        let mut interrupter = Interrupter::new(&arbiter);

        interrupter.toggle(InterruptionKind::Notification);
        player.request_focus(StreamType::Music, FocusGain::Gain);
        assert_eq!(interrupter.active(), None);

        // The stale interruption does not swallow the next toggle
        assert_eq!(
            interrupter.toggle(InterruptionKind::Call),
            Some(InterruptionKind::Call)
        );
        assert!(!player.has_focus());
    }
}
