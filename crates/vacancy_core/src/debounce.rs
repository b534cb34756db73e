use std::time::{Duration, Instant};

/// Trailing-edge debounce: only the last value of a burst survives.
///
/// The caller supplies the clock, so `poll` is only as timely as its ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the window.
    pub fn push(&mut self, value: T, at: Instant) {
        self.pending = Some((value, at));
    }

    /// Yields the pending value once the window has elapsed since the last push.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let (_, pushed_at) = self.pending.as_ref()?;
        if now.saturating_duration_since(*pushed_at) < self.window {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

/// Leading-edge throttle: the first event passes, repeats inside the window drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Throttle {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    pub fn accept(&mut self, at: Instant) -> bool {
        if let Some(last) = self.last_accepted {
            if at.saturating_duration_since(last) < self.window {
                return false;
            }
        }
        self.last_accepted = Some(at);
        true
    }
}
