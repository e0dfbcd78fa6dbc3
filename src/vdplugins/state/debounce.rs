use std::time::{Duration, Instant};

/// Trailing-edge debounce around a sink callback.
///
/// Each [`call`](Self::call) replaces the pending value and pushes the
/// deadline to `now + interval`. The sink runs once, with the latest value,
/// when [`poll`](Self::poll) observes the deadline has passed. Superseded
/// values are dropped without ever reaching the sink.
///
/// Time is supplied by the caller, so the owner's event loop decides when
/// polling happens.
pub struct Debounced<T> {
    interval: Duration,
    pending: Option<Pending<T>>,
    sink: Box<dyn FnMut(T)>,
}

struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Debounced<T> {
    pub fn new(interval: Duration, sink: impl FnMut(T) + 'static) -> Self {
        Self {
            interval,
            pending: None,
            sink: Box::new(sink),
        }
    }

    /// Schedule `value`, resetting the timer.
    pub fn call(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.interval,
        });
    }

    /// Fire the sink if the deadline has passed. Returns whether it fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        match &self.pending {
            Some(p) if p.deadline <= now => self.flush(),
            _ => false,
        }
    }

    /// Fire the sink immediately with the pending value, if there is one.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(p) => {
                (self.sink)(p.value);
                true
            }
            None => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
