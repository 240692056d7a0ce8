//! Named one-shot deadlines owned by a session.
//!
//! Timers are plain deadlines polled from the session tick, so dropping the
//! session drops every timer with it.

use std::collections::HashMap;
use std::time::Instant;

/// The session's deferred actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Record a `typing` checkpoint once keystrokes pause.
    TypingCheckpoint,
    /// Return from `error` to `idle`.
    ErrorClear,
    /// Return from `done` to `idle`.
    DoneClear,
}

/// At most one pending deadline per [`TimerKind`]; re-arming replaces it.
#[derive(Debug, Default)]
pub struct NamedTimers {
    deadlines: HashMap<TimerKind, Instant>,
}

impl NamedTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, kind: TimerKind, at: Instant) {
        self.deadlines.insert(kind, at);
    }

    /// Returns `true` if the timer was armed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.deadlines.remove(&kind).is_some()
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.deadlines.contains_key(&kind)
    }

    pub fn cancel_all(&mut self) {
        self.deadlines.clear();
    }

    /// Remove and return every timer due at `now`, earliest first.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut due: Vec<(Instant, TimerKind)> = self
            .deadlines
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(kind, at)| (*at, *kind))
            .collect();
        due.sort_by_key(|(at, _)| *at);

        for (_, kind) in &due {
            self.deadlines.remove(kind);
        }
        due.into_iter().map(|(_, kind)| kind).collect()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn poll_returns_due_timers_in_order() {
        let t0 = Instant::now();
        let mut timers = NamedTimers::new();
        timers.arm(TimerKind::DoneClear, t0 + Duration::from_millis(20));
        timers.arm(TimerKind::TypingCheckpoint, t0 + Duration::from_millis(10));
        timers.arm(TimerKind::ErrorClear, t0 + Duration::from_secs(10));

        assert!(timers.poll(t0).is_empty());
        let fired = timers.poll(t0 + Duration::from_millis(30));
        assert_eq!(fired, [TimerKind::TypingCheckpoint, TimerKind::DoneClear]);
        assert!(timers.is_armed(TimerKind::ErrorClear));
        assert!(!timers.is_armed(TimerKind::DoneClear));
    }

    #[test]
    fn rearm_replaces_deadline() {
        let t0 = Instant::now();
        let mut timers = NamedTimers::new();
        timers.arm(TimerKind::TypingCheckpoint, t0 + Duration::from_millis(10));
        timers.arm(TimerKind::TypingCheckpoint, t0 + Duration::from_millis(100));
        assert!(timers.poll(t0 + Duration::from_millis(50)).is_empty());
        assert_eq!(timers.next_deadline(), Some(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn cancel_reports_whether_armed() {
        let mut timers = NamedTimers::new();
        assert!(!timers.cancel(TimerKind::ErrorClear));
        timers.arm(TimerKind::ErrorClear, Instant::now());
        assert!(timers.cancel(TimerKind::ErrorClear));
        timers.arm(TimerKind::DoneClear, Instant::now());
        timers.cancel_all();
        assert!(timers.next_deadline().is_none());
    }
}
