//! # Query State
//!
//! [`QueryStateStore`] is the single owner and writer of the live query. It
//! keeps the query in sync with a [`ShareableState`] (a share link fragment):
//!
//! - On startup the fragment is percent-decoded into the initial query. A
//!   malformed fragment yields an empty query; it is never fatal.
//! - [`set_query`](QueryStateStore::set_query) updates the query at once and
//!   schedules a debounced, replace-only write of the encoded value.
//! - Subscribers registered with [`subscribe`](QueryStateStore::subscribe)
//!   are told about every change synchronously.
//!
//! ```text
//!            set_query                    set_query (timer reset)
//!   Idle ───────────────▶ Editing ◀──────────────────┐
//!    ▲                      │  └──────────────────────┘
//!    └──── tick: deadline ──┘
//!          passed, write done
//! ```

use std::time::{Duration, Instant};

pub mod codec;
pub mod debounce;
pub mod location;

pub use debounce::Debounced;
pub use location::{SessionLocation, ShareableState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The shareable state reflects the live query.
    Idle,
    /// A write is scheduled and the shareable state lags behind.
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

type Subscriber = Box<dyn FnMut(&str)>;

pub struct QueryStateStore {
    query: String,
    persist: Debounced<String>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: usize,
}

impl QueryStateStore {
    /// Read the initial query from `location` and take over writing to it.
    pub fn initialize<L: ShareableState + 'static>(mut location: L, interval: Duration) -> Self {
        let raw = location.fragment();
        let query = match codec::decode(&raw) {
            Ok(query) => query,
            Err(e) => {
                tracing::warn!(fragment = %raw, error = %e, "ignoring undecodable shared query");
                String::new()
            }
        };

        let persist = Debounced::new(interval, move |value: String| {
            let encoded = codec::encode(&value);
            tracing::debug!(fragment = %encoded, "persisting query");
            location.replace_fragment(&encoded);
        });

        Self {
            query,
            persist,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the live query and schedule the shareable write.
    pub fn set_query(&mut self, value: impl Into<String>, now: Instant) {
        self.query = value.into();
        self.persist.call(self.query.clone(), now);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.query);
        }
    }

    /// Perform the scheduled write if its quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.persist.poll(now)
    }

    /// Write any scheduled value now, e.g. before the session ends.
    pub fn flush(&mut self) -> bool {
        self.persist.flush()
    }

    pub fn phase(&self) -> Phase {
        if self.persist.is_pending() {
            Phase::Editing
        } else {
            Phase::Idle
        }
    }

    /// When the scheduled write is due, if one is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.persist.deadline()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&str) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }
}
