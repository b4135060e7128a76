//! Auto-hide timers.
//!
//! Each armed timer is a tokio task that sleeps and then posts an
//! [`Event::Expired`] back to the event loop, which owns the display state.
//! Cancelling aborts the task. An expiry can still be in the channel when its
//! timer is cancelled or re-armed, so every timer carries a generation and the
//! loop only acts on an expiry that [`TimerManager::claim`] accepts.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;
use wlosd_protocol::Address;

use super::daemon::Event;

/// Notice that a timer ran out, posted to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiry {
    pub address: Address,
    generation: u64,
}

struct Armed {
    generation: u64,
    task: JoinHandle<()>,
}

/// Pending auto-hide timers, keyed by window uid then sub-uid.
pub struct TimerManager {
    events: UnboundedSender<Event>,
    timers: HashMap<String, HashMap<String, Armed>>,
    next_generation: u64,
}

impl TimerManager {
    pub fn new(events: UnboundedSender<Event>) -> Self {
        Self {
            events,
            timers: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Arm a single-shot timer for an address, replacing any existing one.
    ///
    /// Must be called inside a tokio runtime.
    pub fn schedule(&mut self, window_uid: &str, sub_uid: &str, after: Duration) {
        self.cancel(window_uid, sub_uid);

        let generation = self.next_generation;
        self.next_generation += 1;

        let expiry = Expiry {
            address: Address::new(window_uid, sub_uid),
            generation,
        };
        debug!(uid = %expiry.address, ?after, "arming auto-hide timer");

        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            // Nobody is listening once the loop has exited
            let _ = events.send(Event::Expired(expiry));
        });

        self.timers
            .entry(window_uid.to_string())
            .or_default()
            .insert(sub_uid.to_string(), Armed { generation, task });
    }

    /// Disarm the timer for exactly this address. Returns whether one existed.
    pub fn cancel(&mut self, window_uid: &str, sub_uid: &str) -> bool {
        let Some(subs) = self.timers.get_mut(window_uid) else {
            return false;
        };
        let removed = subs.remove(sub_uid);
        if subs.is_empty() {
            self.timers.remove(window_uid);
        }

        match removed {
            Some(armed) => {
                armed.task.abort();
                true
            }
            None => false,
        }
    }

    /// Disarm every timer of a window. Returns how many were pending.
    pub fn cancel_all(&mut self, window_uid: &str) -> usize {
        let Some(subs) = self.timers.remove(window_uid) else {
            return 0;
        };
        let count = subs.len();
        for armed in subs.into_values() {
            armed.task.abort();
        }
        count
    }

    /// Accept an expiry if its timer is still the armed one, disarming it.
    pub fn claim(&mut self, expiry: &Expiry) -> bool {
        let Address { window, sub } = &expiry.address;
        let current = self
            .timers
            .get(window)
            .and_then(|subs| subs.get(sub))
            .is_some_and(|armed| armed.generation == expiry.generation);

        if current {
            self.cancel(window, sub);
        }
        current
    }

    pub fn is_armed(&self, window_uid: &str, sub_uid: &str) -> bool {
        self.timers
            .get(window_uid)
            .is_some_and(|subs| subs.contains_key(sub_uid))
    }

    /// Number of armed timers
    pub fn len(&self) -> usize {
        self.timers.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
