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

//! Position-report timer.
//!
//! A cancellable repeating task that posts [`AppEvent::ReportPosition`] to
//! the application channel once per period. The event is handled on the main
//! thread like any other, so the timer itself never touches the player.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
    },
    thread,
    time::Duration,
};

use crate::events::AppEvent;

/// Handle to a running repeating timer.
///
/// The timer stops when it is cancelled, when the handle is dropped, or when
/// the application channel is closed.
pub(crate) struct RepeatingTimer {
    pub(super) cancelled: Arc<AtomicBool>,
}

impl RepeatingTimer {
    /// Starts a timer, the first report is posted one period from now.
    pub(crate) fn start(period: Duration, event_tx: Sender<AppEvent>) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        thread::spawn(move || {
            loop {
                thread::sleep(period);
                if flag.load(Ordering::Acquire) {
                    break;
                }
                if event_tx.send(AppEvent::ReportPosition).is_err() {
                    break;
                }
            }
        });

        Self { cancelled }
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

impl Drop for RepeatingTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    const PERIOD: Duration = Duration::from_millis(10);

    #[test]
    fn posts_reports_every_period() {
        let (tx, rx) = mpsc::channel();
        let _timer = RepeatingTimer::start(PERIOD, tx);

        for _ in 0..3 {
            let event = rx.recv_timeout(Duration::from_secs(1)).unwrap();
            assert!(matches!(event, AppEvent::ReportPosition));
        }
    }

    #[test]
    fn cancelled_timer_goes_quiet() {
        let (tx, rx) = mpsc::channel();
        let timer = RepeatingTimer::start(PERIOD, tx);
        rx.recv_timeout(Duration::from_secs(1)).unwrap();

        timer.cancel();

        // A report may already be in flight when the timer is cancelled
        thread::sleep(PERIOD * 5);
        while rx.try_recv().is_ok() {}
        thread::sleep(PERIOD * 5);

        assert!(rx.try_recv().is_err());
    }
}
