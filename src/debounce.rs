use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

/// How long resize signals are coalesced before a subscriber is notified.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// Identifies one scheduled firing. Every signal schedules a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    fn next() -> TimerToken {
        static TIMER_COUNTER: AtomicU64 = AtomicU64::new(1);
        TimerToken(TIMER_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    token: TimerToken,
    deadline: Instant,
}

/// A timer that collapses a burst of signals into one firing.
///
/// Every [`signal`](Self::signal) replaces the pending deadline with
/// `now + interval`, so the timer only fires once the signals stop for a full
/// interval. Each firing is reported exactly once by [`poll`](Self::poll).
#[derive(Debug, Clone)]
pub struct CoalescingTimer {
    interval: Duration,
    pending: Option<Pending>,
}

impl CoalescingTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cancels any pending firing and schedules a new one. Returns its token.
    pub fn signal(&mut self, now: Instant) -> TimerToken {
        let token = TimerToken::next();
        self.pending = Some(Pending {
            token,
            deadline: now + self.interval,
        });
        token
    }

    /// Fires if the pending deadline has passed; the firing is consumed.
    pub fn poll(&mut self, now: Instant) -> Option<TimerToken> {
        match self.pending {
            Some(pending) if pending.deadline <= now => {
                self.pending = None;
                Some(pending.token)
            }
            _ => None,
        }
    }

    /// Drops the pending firing, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|pending| pending.deadline)
    }

    pub fn token(&self) -> Option<TimerToken> {
        self.pending.map(|pending| pending.token)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for CoalescingTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
