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

//! In-process audio focus arbiter.
//!
//! The arbiter keeps a stack of focus holders, the top of the stack owns the
//! output. A new request pushes the requester and notifies the previous
//! holder that it lost focus, abandoning focus pops the holder and hands the
//! focus back to whoever is next on the stack.
//!
//! A client holding [`FocusGain::GainTransientExclusive`] (a call, say)
//! causes every other request to be denied until it abandons focus.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tracing::{debug, info};

use crate::focus::{
    AudioFocus, FocusChange, FocusGain, FocusListener, FocusRequestResult, StreamType,
};

type ClientId = u32;

struct Holder {
    client: ClientId,
    gain: FocusGain,
}

#[derive(Default)]
struct ArbiterState {
    next_id: ClientId,
    stack: Vec<Holder>,
    listeners: HashMap<ClientId, FocusListener>,
}

impl ArbiterState {
    fn top(&self) -> Option<&Holder> {
        self.stack.last()
    }

    fn listener(&self, client: ClientId) -> Option<FocusListener> {
        self.listeners.get(&client).cloned()
    }
}

/// Shared handle to the focus stack.
#[derive(Clone, Default)]
pub(crate) struct FocusArbiter {
    state: Arc<Mutex<ArbiterState>>,
}

impl FocusArbiter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers a new consumer with the arbiter.
    ///
    /// # Arguments
    ///
    /// * `name` - A label used when logging focus decisions.
    /// * `listener` - Invoked with every focus change for this consumer.
    pub(crate) fn client(
        &self,
        name: &str,
        listener: impl Fn(FocusChange) + Send + Sync + 'static,
    ) -> FocusClient {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.insert(id, Arc::new(listener));

        FocusClient {
            arbiter: self.clone(),
            id,
            name: name.to_string(),
        }
    }

    /// Whether the given client is currently at the top of the stack.
    fn holds(&self, client: ClientId) -> bool {
        self.lock().top().is_some_and(|h| h.client == client)
    }

    fn request(
        &self,
        client: ClientId,
        stream: StreamType,
        gain: FocusGain,
    ) -> FocusRequestResult {
        let notify = {
            let mut state = self.lock();

            if let Some(top) = state.top() {
                if top.client == client {
                    state.stack.pop();
                    state.stack.push(Holder { client, gain });
                    return FocusRequestResult::Granted;
                }
                if top.gain == FocusGain::GainTransientExclusive {
                    debug!(client, ?stream, "Focus denied, exclusive holder active");
                    return FocusRequestResult::Denied;
                }
            }

            state.stack.retain(|h| h.client != client);

            let notify = state.top().map(|previous| previous.client);
            if gain == FocusGain::Gain {
                // A permanent loss removes the loser, it will not be handed
                // focus back
                if let Some(previous) = notify {
                    state.stack.retain(|h| h.client != previous);
                }
            }
            state.stack.push(Holder { client, gain });

            info!(client, ?stream, ?gain, "Focus granted");

            notify.and_then(|previous| state.listener(previous))
        };

        if let Some(listener) = notify {
            listener(gain.loss());
        }

        FocusRequestResult::Granted
    }

    fn abandon(&self, client: ClientId) {
        let notify = {
            let mut state = self.lock();

            let was_top = state.top().is_some_and(|h| h.client == client);
            state.stack.retain(|h| h.client != client);

            if !was_top {
                return;
            }

            debug!(client, "Focus abandoned");

            state.top().and_then(|next| state.listener(next.client))
        };

        if let Some(listener) = notify {
            listener(FocusChange::Gain);
        }
    }

    fn unregister(&self, client: ClientId) {
        self.lock().listeners.remove(&client);
    }

    // Poisoning can only follow a panic inside a listener-free critical
    // section, the stack itself is still consistent
    fn lock(&self) -> std::sync::MutexGuard<'_, ArbiterState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A single consumer's view of the [`FocusArbiter`].
///
/// Dropping the client abandons any focus it still holds.
pub(crate) struct FocusClient {
    arbiter: FocusArbiter,
    id: ClientId,
    name: String,
}

impl AudioFocus for FocusClient {
    fn request_focus(&self, stream: StreamType, gain: FocusGain) -> FocusRequestResult {
        debug!(client = %self.name, ?stream, ?gain, "Requesting audio focus");
        self.arbiter.request(self.id, stream, gain)
    }

    fn abandon_focus(&self) {
        self.arbiter.abandon(self.id);
    }

    fn has_focus(&self) -> bool {
        self.arbiter.holds(self.id)
    }
}

impl Drop for FocusClient {
    fn drop(&mut self) {
        self.arbiter.abandon(self.id);
        self.arbiter.unregister(self.id);
    }
}
