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

//! Playback control and state management.
//!
//! The [`PlaybackController`] binds the four on-screen controls (play/pause
//! toggle, stop button, loop toggle and seek bar) to a [`MediaPlayer`] and an
//! [`AudioFocus`] client.
//!
//! Every method is called from the main event loop, in response to user
//! input, a position report, an end-of-track notification, or a focus change.
//! Playback is never started without first being granted audio focus.
//!
//! # States
//!
//! ```text
//! Idle    --play (granted)-------------> Playing
//! Playing --pause / transient loss-----> Paused
//! Paused  --play / focus regained------> Playing
//! Playing, Paused --stop---------------> Stopped
//! Stopped --play-----------------------> Playing
//! ```

mod timer;

use std::{
    sync::mpsc::Sender,
    time::{Duration, Instant},
};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    events::AppEvent,
    focus::{AudioFocus, FocusChange, FocusGain, FocusRequestResult, StreamType},
    player::{MediaPlayer, PlayerState},
};

use timer::RepeatingTimer;

/// How long a notice stays on screen.
const NOTICE_DURATION: Duration = Duration::from_secs(2);

/// Whether a seek bar change came from the user or from a position report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SeekOrigin {
    User,
    Programmatic,
}

/// Visual state of the on-screen controls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Controls {
    pub(crate) play_pressed: bool,
    pub(crate) loop_enabled: bool,
    /// Seek bar position in milliseconds, always within `0..=seek_max`.
    pub(crate) seek_position: u64,
    pub(crate) seek_max: u64,
}

/// A short-lived message shown to the user.
#[derive(Clone, Debug)]
pub(crate) struct Notice {
    pub(crate) message: String,
    shown_at: Instant,
}

impl Notice {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            shown_at: Instant::now(),
        }
    }

    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTICE_DURATION
    }
}

pub(crate) struct PlaybackController<P: MediaPlayer, F: AudioFocus> {
    player: Option<P>,
    focus: F,

    event_tx: Sender<AppEvent>,
    report_period: Duration,
    position_timer: Option<RepeatingTimer>,

    state: PlayerState,
    focus_held: bool,
    suspended_by_focus: bool,
    /// The track ran out without looping, the player rewinds on next start.
    at_end: bool,

    controls: Controls,
    notice: Option<Notice>,
}

impl<P: MediaPlayer, F: AudioFocus> PlaybackController<P, F> {
    /// Creates a controller for the given player, the seek range is set from
    /// the player's duration.
    ///
    /// # Arguments
    ///
    /// * `player` - The player, `None` if it could not be created.
    /// * `focus` - The focus client used to ask for audio focus.
    /// * `event_tx` - Channel the position-report timer posts to.
    /// * `report_period` - Interval between position reports.
    pub(crate) fn new(
        player: Option<P>,
        focus: F,
        event_tx: Sender<AppEvent>,
        report_period: Duration,
    ) -> Self {
        let seek_max = player.as_ref().map_or(0, |p| p.duration());

        Self {
            player,
            focus,
            event_tx,
            report_period,
            position_timer: None,
            state: PlayerState::Idle,
            focus_held: false,
            suspended_by_focus: false,
            at_end: false,
            controls: Controls {
                seek_max,
                ..Controls::default()
            },
            notice: None,
        }
    }

    pub(crate) fn state(&self) -> PlayerState {
        self.state
    }

    pub(crate) fn controls(&self) -> &Controls {
        &self.controls
    }

    pub(crate) fn has_focus_token(&self) -> bool {
        self.focus_held
    }

    #[cfg(test)]
    pub(crate) fn is_reporting(&self) -> bool {
        self.position_timer.is_some()
    }

    /// The current notice, if it has not expired yet.
    pub(crate) fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| !n.is_expired(now))
    }

    /// Updates the seek range once the backend knows the real duration.
    pub(crate) fn set_duration(&mut self, duration_ms: u64) {
        self.controls.seek_max = duration_ms;
        self.controls.seek_position = self.controls.seek_position.min(duration_ms);
    }

    /// Asks for audio focus and starts playback if it is granted.
    ///
    /// Returns whether playback was started. When focus is denied the play
    /// toggle is released again and a notice is shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot be started.
    pub(crate) fn request_focus_and_play(&mut self) -> Result<bool> {
        if self.player.is_none() {
            return Ok(false);
        }

        if self.focus.request_focus(StreamType::Music, FocusGain::Gain)
            == FocusRequestResult::Denied
        {
            warn!("Audio focus denied, not starting playback");
            self.controls.play_pressed = false;
            self.show_notice("Audio focus denied");
            return Ok(false);
        }
        self.focus_held = true;
        self.suspended_by_focus = false;

        if let Some(player) = self.player.as_mut() {
            player.start()?;
        }
        if self.at_end {
            self.at_end = false;
            self.controls.seek_position = 0;
        }

        self.show_notice("Play");
        self.state = PlayerState::Playing;
        self.controls.play_pressed = true;
        self.arm_position_timer();

        Ok(true)
    }

    /// Pauses playback, the focus token is kept so playback can resume
    /// without asking again.
    pub(crate) fn pause(&mut self) -> Result<()> {
        if let Some(player) = self.player.as_mut() {
            player.pause()?;
        }

        if self.state == PlayerState::Playing {
            self.state = PlayerState::Paused;
        }
        self.controls.play_pressed = false;
        self.suspended_by_focus = false;
        self.cancel_position_timer();

        Ok(())
    }

    /// Pauses playback and rewinds to the start, releasing the play toggle
    /// without starting playback again.
    pub(crate) fn stop(&mut self) -> Result<()> {
        let Some(player) = self.player.as_mut() else {
            return Ok(());
        };

        player.pause()?;
        player.seek_to(0)?;

        self.show_notice("Stop");
        self.state = PlayerState::Stopped;
        self.controls.play_pressed = false;
        self.controls.seek_position = 0;
        self.suspended_by_focus = false;
        self.at_end = false;
        self.cancel_position_timer();

        Ok(())
    }

    /// Turns restart-on-completion on or off.
    pub(crate) fn set_loop(&mut self, enabled: bool) {
        info!(enabled, "Loop changed");
        self.controls.loop_enabled = enabled;
    }

    /// Handles a change of the play/pause toggle.
    pub(crate) fn on_play_toggled(&mut self, pressed: bool) -> Result<()> {
        if pressed {
            self.request_focus_and_play()?;
        } else {
            self.pause()?;
        }
        Ok(())
    }

    pub(crate) fn toggle_play(&mut self) -> Result<()> {
        let pressed = !self.controls.play_pressed;
        self.on_play_toggled(pressed)
    }

    /// Handles a seek bar movement.
    ///
    /// The position is clamped to the track. Only user movements seek the
    /// player, programmatic ones just update the display.
    pub(crate) fn on_seek_bar_moved(
        &mut self,
        position_ms: i64,
        origin: SeekOrigin,
    ) -> Result<()> {
        let target = clamp_position(position_ms, self.controls.seek_max);
        self.controls.seek_position = target;

        if origin == SeekOrigin::User {
            self.at_end = false;
            if let Some(player) = self.player.as_mut() {
                debug!(target, "Seeking");
                player.seek_to(target)?;
            }
        }

        Ok(())
    }

    /// Seeks relative to the current playback position.
    pub(crate) fn seek_by(&mut self, delta_ms: i64) -> Result<()> {
        let current = self
            .player
            .as_ref()
            .map_or(self.controls.seek_position, |p| p.position());
        let target = i64::try_from(current).unwrap_or(i64::MAX).saturating_add(delta_ms);
        self.on_seek_bar_moved(target, SeekOrigin::User)
    }

    /// Publishes the player position to the seek bar.
    ///
    /// Reports that arrive after the timer was cancelled are ignored.
    pub(crate) fn report_position(&mut self) -> Result<()> {
        if self.position_timer.is_none() {
            return Ok(());
        }
        let Some(position) = self.player.as_ref().map(|p| p.position()) else {
            return Ok(());
        };
        let position = i64::try_from(position).unwrap_or(i64::MAX);
        self.on_seek_bar_moved(position, SeekOrigin::Programmatic)
    }

    /// Reacts to a focus change delivered by the arbiter.
    ///
    /// Changes are queued, so one can arrive after the focus has moved on.
    /// A loss while holding focus, or a gain while not holding it, is stale
    /// and ignored.
    pub(crate) fn on_focus_change(&mut self, change: FocusChange) -> Result<()> {
        let holds_focus = self.focus.has_focus();
        let current = match change {
            FocusChange::Gain => holds_focus,
            _ => !holds_focus,
        };
        if !current {
            debug!(?change, "Ignoring stale focus change");
            return Ok(());
        }

        info!(?change, state = ?self.state, "Audio focus changed");

        match change {
            FocusChange::LossTransient | FocusChange::LossTransientCanDuck => {
                if let Some(player) = self.player.as_mut() {
                    player.pause()?;
                }
                if self.state == PlayerState::Playing {
                    self.state = PlayerState::Paused;
                    self.suspended_by_focus = true;
                    self.cancel_position_timer();
                }
            }
            FocusChange::Loss => {
                if let Some(player) = self.player.as_mut() {
                    player.pause()?;
                }
                if self.state == PlayerState::Playing {
                    self.state = PlayerState::Paused;
                }
                self.focus.abandon_focus();
                self.focus_held = false;
                self.suspended_by_focus = false;
                self.controls.play_pressed = false;
                self.cancel_position_timer();
            }
            FocusChange::Gain => {
                if self.suspended_by_focus {
                    if let Some(player) = self.player.as_mut() {
                        player.start()?;
                    }
                    self.suspended_by_focus = false;
                    self.state = PlayerState::Playing;
                    self.controls.play_pressed = true;
                    self.arm_position_timer();
                }
            }
        }

        Ok(())
    }

    /// Handles the natural end of the track.
    pub(crate) fn on_completion(&mut self) -> Result<()> {
        if self.controls.loop_enabled {
            info!("Track finished, looping");
            self.controls.seek_position = 0;
            if self.request_focus_and_play()? {
                return Ok(());
            }
        } else {
            info!("Track finished");
            self.controls.seek_position = self.controls.seek_max;
            self.at_end = true;
        }

        self.state = PlayerState::Stopped;
        self.controls.play_pressed = false;
        self.cancel_position_timer();

        Ok(())
    }

    /// Releases the player and gives the audio focus back.
    ///
    /// Safe to call more than once, and when no player was ever created.
    pub(crate) fn teardown(&mut self) {
        self.cancel_position_timer();

        if let Some(mut player) = self.player.take() {
            player.release();
            self.focus.abandon_focus();
            self.focus_held = false;
            info!("Playback torn down");
        }
    }

    fn arm_position_timer(&mut self) {
        if self.position_timer.is_none() {
            debug!(period = ?self.report_period, "Position timer armed");
            self.position_timer = Some(RepeatingTimer::start(
                self.report_period,
                self.event_tx.clone(),
            ));
        }
    }

    fn cancel_position_timer(&mut self) {
        if let Some(timer) = self.position_timer.take() {
            timer.cancel();
            debug!("Position timer cancelled");
        }
    }

    fn show_notice(&mut self, message: &str) {
        debug!(message, "Notice");
        self.notice = Some(Notice::new(message));
    }

    /// Shows a notice that did not originate from a playback action.
    pub(crate) fn notify(&mut self, message: &str) {
        self.show_notice(message);
    }
}

impl<P: MediaPlayer, F: AudioFocus> Drop for PlaybackController<P, F> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn clamp_position(position_ms: i64, max_ms: u64) -> u64 {
    u64::try_from(position_ms).unwrap_or(0).min(max_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        focus::{FocusArbiter, FocusClient, Interrupter, InterruptionKind},
        player::PlayerError,
    };
    use std::{
        cell::RefCell,
        rc::Rc,
        sync::{Arc, mpsc},
    };

    const DURATION: u64 = 180_000;

    #[derive(Debug, Default)]
    struct FakeState {
        playing: bool,
        at_end: bool,
        position: u64,
        duration: u64,
        starts: u32,
        pauses: u32,
        seeks: Vec<u64>,
        releases: u32,
    }

    #[derive(Clone, Default)]
    struct FakePlayer(Rc<RefCell<FakeState>>);

    impl FakePlayer {
        fn with_duration(duration: u64) -> Self {
            let player = Self::default();
            player.0.borrow_mut().duration = duration;
            player
        }

        fn finish(&self) {
            let mut state = self.0.borrow_mut();
            state.position = state.duration;
            state.playing = false;
            state.at_end = true;
        }
    }

    impl MediaPlayer for FakePlayer {
        fn start(&mut self) -> Result<(), PlayerError> {
            let mut state = self.0.borrow_mut();
            if state.at_end {
                state.position = 0;
                state.at_end = false;
            }
            state.playing = true;
            state.starts += 1;
            Ok(())
        }

        fn pause(&mut self) -> Result<(), PlayerError> {
            let mut state = self.0.borrow_mut();
            state.playing = false;
            state.pauses += 1;
            Ok(())
        }

        fn seek_to(&mut self, position_ms: u64) -> Result<(), PlayerError> {
            let mut state = self.0.borrow_mut();
            state.position = position_ms;
            state.at_end = false;
            state.seeks.push(position_ms);
            Ok(())
        }

        fn position(&self) -> u64 {
            self.0.borrow().position
        }

        fn duration(&self) -> u64 {
            self.0.borrow().duration
        }

        fn release(&mut self) {
            self.0.borrow_mut().releases += 1;
        }
    }

    struct Fixture {
        arbiter: FocusArbiter,
        player: FakePlayer,
        controller: TestController,
        focus_rx: mpsc::Receiver<FocusChange>,
        _event_rx: mpsc::Receiver<AppEvent>,
    }

    impl Fixture {
        /// Hands the queued focus changes to the controller, the way the
        /// event loop does.
        fn deliver_focus_changes(&mut self) {
            while let Ok(change) = self.focus_rx.try_recv() {
                self.controller.on_focus_change(change).unwrap();
            }
        }
    }

    fn fixture() -> Fixture {
        let arbiter = FocusArbiter::new();
        let player = FakePlayer::with_duration(DURATION);
        let (event_tx, event_rx) = mpsc::channel();
        let (focus_tx, focus_rx) = mpsc::channel();
        let controller = PlaybackController::new(
            Some(player.clone()),
            arbiter.client("test", move |change| {
                focus_tx.send(change).ok();
            }),
            event_tx,
            Duration::from_secs(1),
        );
        Fixture {
            arbiter,
            player,
            controller,
            focus_rx,
            _event_rx: event_rx,
        }
    }

    #[test]
    fn initial_seek_range_is_track_duration() {
        let f = fixture();
        assert_eq!(f.controller.controls().seek_max, DURATION);
        assert_eq!(f.controller.controls().seek_position, 0);
        assert_eq!(f.controller.state(), PlayerState::Idle);
    }

    #[test]
    fn play_with_focus_starts_player_and_timer() {
        let mut f = fixture();

        assert!(f.controller.request_focus_and_play().unwrap());

        assert!(f.player.0.borrow().playing);
        assert_eq!(f.controller.state(), PlayerState::Playing);
        assert!(f.controller.has_focus_token());
        assert!(f.controller.is_reporting());
        assert!(f.controller.controls().play_pressed);
        assert_eq!(
            f.controller.notice(Instant::now()).map(|n| n.message.as_str()),
            Some("Play")
        );
        assert_eq!(f.controller.report_period, Duration::from_millis(1000));
    }

    #[test]
    fn denied_focus_starts_nothing_and_says_so() {
        let mut f = fixture();
        let call = f.arbiter.client("call", |_| {});
        call.request_focus(StreamType::VoiceCall, FocusGain::GainTransientExclusive);

        f.controller.on_play_toggled(true).unwrap();

        assert_eq!(f.player.0.borrow().starts, 0);
        assert!(!f.controller.is_reporting());
        assert!(!f.controller.controls().play_pressed);
        assert_eq!(f.controller.state(), PlayerState::Idle);
        assert_eq!(
            f.controller.notice(Instant::now()).map(|n| n.message.as_str()),
            Some("Audio focus denied")
        );
    }

    #[test]
    fn pause_keeps_focus_and_cancels_timer() {
        let mut f = fixture();
        f.controller.request_focus_and_play().unwrap();

        f.controller.on_play_toggled(false).unwrap();

        assert!(!f.player.0.borrow().playing);
        assert_eq!(f.controller.state(), PlayerState::Paused);
        assert!(f.controller.has_focus_token());
        assert!(!f.controller.is_reporting());
    }

    #[test]
    fn stop_mid_playback_rewinds_and_releases_toggle() {
        let mut f = fixture();
        f.controller.request_focus_and_play().unwrap();
        f.player.0.borrow_mut().position = 95_000;
        f.controller.report_position().unwrap();
        assert_eq!(f.controller.controls().seek_position, 95_000);

        f.controller.stop().unwrap();

        let state = f.player.0.borrow();
        assert!(!state.playing);
        assert_eq!(state.position, 0);
        assert_eq!(f.controller.controls().seek_position, 0);
        assert!(!f.controller.controls().play_pressed);
        assert_eq!(f.controller.state(), PlayerState::Stopped);
        assert!(!f.controller.is_reporting());
    }

    type TestController = PlaybackController<FakePlayer, FocusClient>;

    fn leave_idle(_: &mut TestController) {}

    fn start_playing(c: &mut TestController) {
        c.request_focus_and_play().unwrap();
    }

    fn start_then_pause(c: &mut TestController) {
        c.request_focus_and_play().unwrap();
        c.pause().unwrap();
    }

    #[test]
    fn stop_from_any_state_rewinds() {
        let preparations: [fn(&mut TestController); 3] =
            [leave_idle, start_playing, start_then_pause];

        for prepare in preparations {
            let mut f = fixture();
            prepare(&mut f.controller);
            f.player.0.borrow_mut().position = 42_000;

            f.controller.stop().unwrap();

            assert_eq!(f.player.0.borrow().position, 0);
            assert_eq!(f.controller.controls().seek_position, 0);
            assert!(!f.controller.controls().play_pressed);
        }
    }

    #[test]
    fn play_after_stop_resumes() {
        let mut f = fixture();
        f.controller.request_focus_and_play().unwrap();
        f.controller.stop().unwrap();

        f.controller.toggle_play().unwrap();

        assert_eq!(f.controller.state(), PlayerState::Playing);
        assert_eq!(f.player.0.borrow().starts, 2);
    }

    #[test]
    fn user_seek_is_clamped_to_track() {
        let mut f = fixture();

        for (input, expected) in [
            (-5_000, 0),
            (0, 0),
            (60_000, 60_000),
            (DURATION as i64, DURATION),
            (DURATION as i64 + 1, DURATION),
            (i64::MAX, DURATION),
            (i64::MIN, 0),
        ] {
            f.controller.on_seek_bar_moved(input, SeekOrigin::User).unwrap();
            assert_eq!(f.player.0.borrow().seeks.last(), Some(&expected));
            assert_eq!(f.controller.controls().seek_position, expected);
        }
    }

    #[test]
    fn relative_seek_is_clamped() {
        let mut f = fixture();
        f.player.0.borrow_mut().position = 3_000;

        f.controller.seek_by(-5_000).unwrap();
        assert_eq!(f.player.0.borrow().position, 0);

        f.player.0.borrow_mut().position = 170_000;
        f.controller.seek_by(20_000).unwrap();
        assert_eq!(f.player.0.borrow().position, DURATION);
    }

    #[test]
    fn programmatic_updates_never_seek() {
        let mut f = fixture();
        f.controller.request_focus_and_play().unwrap();
        f.player.0.borrow_mut().position = 12_000;

        f.controller.report_position().unwrap();
        f.controller
            .on_seek_bar_moved(30_000, SeekOrigin::Programmatic)
            .unwrap();

        assert!(f.player.0.borrow().seeks.is_empty());
        assert_eq!(f.controller.controls().seek_position, 30_000);
    }

    #[test]
    fn reports_after_cancel_are_ignored() {
        let mut f = fixture();
        f.controller.request_focus_and_play().unwrap();
        f.controller.pause().unwrap();
        f.player.0.borrow_mut().position = 77_000;

        f.controller.report_position().unwrap();

        assert_eq!(f.controller.controls().seek_position, 0);
    }

    #[test]
    fn only_one_timer_while_playing() {
        let mut f = fixture();
        f.controller.request_focus_and_play().unwrap();
        let first = f.controller.position_timer.as_ref().map(|t| Arc::as_ptr(&t.cancelled));

        f.controller.request_focus_and_play().unwrap();
        let second = f.controller.position_timer.as_ref().map(|t| Arc::as_ptr(&t.cancelled));

        assert_eq!(first, second);
    }

    #[test]
    fn call_pauses_and_hanging_up_resumes() {
        let mut f = fixture();
        let mut interrupter = Interrupter::new(&f.arbiter);
        f.controller.request_focus_and_play().unwrap();

        interrupter.toggle(InterruptionKind::Call);
        f.deliver_focus_changes();
        assert!(!f.player.0.borrow().playing);
        assert_eq!(f.controller.state(), PlayerState::Paused);
        assert!(f.controller.has_focus_token());
        assert!(!f.controller.is_reporting());

        interrupter.toggle(InterruptionKind::Call);
        f.deliver_focus_changes();
        assert!(f.player.0.borrow().playing);
        assert_eq!(f.controller.state(), PlayerState::Playing);
        assert!(f.controller.controls().play_pressed);
        assert!(f.controller.is_reporting());
    }

    #[test]
    fn notification_pauses_until_it_is_done() {
        let mut f = fixture();
        let mut interrupter = Interrupter::new(&f.arbiter);
        f.controller.request_focus_and_play().unwrap();

        interrupter.toggle(InterruptionKind::Notification);
        f.deliver_focus_changes();
        assert!(!f.player.0.borrow().playing);
        assert_eq!(f.controller.state(), PlayerState::Paused);

        interrupter.toggle(InterruptionKind::Notification);
        f.deliver_focus_changes();
        assert!(f.player.0.borrow().playing);
        assert_eq!(f.player.0.borrow().starts, 2);
    }

    #[test]
    fn another_app_takes_focus_for_good() {
        let mut f = fixture();
        let mut interrupter = Interrupter::new(&f.arbiter);
        f.controller.request_focus_and_play().unwrap();

        interrupter.toggle(InterruptionKind::OtherApp);
        f.deliver_focus_changes();
        interrupter.toggle(InterruptionKind::OtherApp);
        f.deliver_focus_changes();

        assert!(!f.player.0.borrow().playing);
        assert_eq!(f.player.0.borrow().starts, 1);
        assert!(!f.controller.has_focus_token());
        assert!(!f.controller.focus.has_focus());
        assert!(!f.controller.controls().play_pressed);
        assert_eq!(f.controller.state(), PlayerState::Paused);
    }

    #[test]
    fn gain_from_idle_does_not_start() {
        let mut f = fixture();

        f.controller.on_focus_change(FocusChange::Gain).unwrap();

        assert_eq!(f.player.0.borrow().starts, 0);
        assert_eq!(f.controller.state(), PlayerState::Idle);
    }

    #[test]
    fn gain_after_user_pause_does_not_start() {
        let mut f = fixture();
        let mut interrupter = Interrupter::new(&f.arbiter);
        f.controller.request_focus_and_play().unwrap();
        interrupter.toggle(InterruptionKind::Call);
        f.deliver_focus_changes();
        f.controller.on_play_toggled(false).unwrap();

        interrupter.toggle(InterruptionKind::Call);
        f.deliver_focus_changes();

        assert_eq!(f.player.0.borrow().starts, 1);
        assert_eq!(f.controller.state(), PlayerState::Paused);
    }

    #[test]
    fn loss_queued_before_play_again_is_ignored() {
        let mut f = fixture();
        let mut interrupter = Interrupter::new(&f.arbiter);
        f.controller.request_focus_and_play().unwrap();
        f.controller.pause().unwrap();

        interrupter.toggle(InterruptionKind::OtherApp);
        assert!(f.controller.request_focus_and_play().unwrap());
        f.deliver_focus_changes();

        assert!(f.player.0.borrow().playing);
        assert_eq!(f.controller.state(), PlayerState::Playing);
        assert!(f.controller.has_focus_token());
        assert!(f.controller.focus.has_focus());
        assert!(f.controller.controls().play_pressed);
        assert!(f.controller.is_reporting());
    }

    #[test]
    fn call_already_over_does_not_pause() {
        let mut f = fixture();
        let mut interrupter = Interrupter::new(&f.arbiter);
        f.controller.request_focus_and_play().unwrap();

        interrupter.toggle(InterruptionKind::Call);
        interrupter.toggle(InterruptionKind::Call);
        f.deliver_focus_changes();

        assert!(f.player.0.borrow().playing);
        assert_eq!(f.player.0.borrow().pauses, 0);
        assert_eq!(f.controller.state(), PlayerState::Playing);
        assert!(f.controller.is_reporting());
    }

    #[test]
    fn completion_with_loop_restarts_from_zero() {
        let mut f = fixture();
        f.controller.set_loop(true);
        f.controller.request_focus_and_play().unwrap();
        f.player.finish();

        f.controller.on_completion().unwrap();

        let state = f.player.0.borrow();
        assert!(state.playing);
        assert_eq!(state.position, 0);
        assert_eq!(state.starts, 2);
        assert_eq!(f.controller.state(), PlayerState::Playing);
        assert!(f.controller.is_reporting());
    }

    #[test]
    fn completion_without_loop_stops() {
        let mut f = fixture();
        f.controller.set_loop(true);
        f.controller.set_loop(false);
        f.controller.request_focus_and_play().unwrap();
        f.player.finish();

        f.controller.on_completion().unwrap();

        assert_eq!(f.player.0.borrow().starts, 1);
        assert_eq!(f.controller.state(), PlayerState::Stopped);
        assert_eq!(f.controller.controls().seek_position, DURATION);
        assert!(!f.controller.controls().play_pressed);
        assert!(!f.controller.is_reporting());
    }

    #[test]
    fn play_after_the_end_shows_the_start() {
        let mut f = fixture();
        f.controller.request_focus_and_play().unwrap();
        f.player.finish();
        f.controller.on_completion().unwrap();

        f.controller.toggle_play().unwrap();

        assert_eq!(f.player.0.borrow().position, 0);
        assert_eq!(f.controller.controls().seek_position, 0);
        assert_eq!(f.controller.state(), PlayerState::Playing);
    }

    #[test]
    fn seek_after_the_end_is_kept_on_play() {
        let mut f = fixture();
        f.controller.request_focus_and_play().unwrap();
        f.player.finish();
        f.controller.on_completion().unwrap();

        f.controller
            .on_seek_bar_moved(60_000, SeekOrigin::User)
            .unwrap();
        f.controller.toggle_play().unwrap();

        assert_eq!(f.player.0.borrow().position, 60_000);
        assert_eq!(f.controller.controls().seek_position, 60_000);
    }

    #[test]
    fn teardown_twice_is_harmless() {
        let mut f = fixture();
        f.controller.request_focus_and_play().unwrap();

        f.controller.teardown();
        f.controller.teardown();

        assert_eq!(f.player.0.borrow().releases, 1);
        assert!(!f.controller.has_focus_token());
        assert!(!f.controller.is_reporting());
    }

    #[test]
    fn teardown_gives_focus_back_to_arbiter() {
        let mut f = fixture();
        f.controller.request_focus_and_play().unwrap();
        assert!(f.controller.focus.has_focus());

        f.controller.teardown();

        assert!(!f.controller.focus.has_focus());
    }

    #[test]
    fn controller_without_player_is_inert() {
        let (event_tx, _event_rx) = mpsc::channel();
        let arbiter = FocusArbiter::new();
        let mut controller = PlaybackController::<FakePlayer, _>::new(
            None,
            arbiter.client("test", |_| {}),
            event_tx,
            Duration::from_secs(1),
        );

        assert!(!controller.request_focus_and_play().unwrap());
        controller.stop().unwrap();
        controller.teardown();
        controller.teardown();
    }

    #[test]
    fn set_duration_reclamps_position() {
        let mut f = fixture();
        f.controller
            .on_seek_bar_moved(150_000, SeekOrigin::User)
            .unwrap();

        f.controller.set_duration(100_000);

        assert_eq!(f.controller.controls().seek_max, 100_000);
        assert_eq!(f.controller.controls().seek_position, 100_000);
    }
}
