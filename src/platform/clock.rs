//! Time sources and tick gates
//!
//! The simulation never reads wall time itself. Hosts hand it millisecond
//! timestamps (from `requestAnimationFrame`, an [`Instant`], or a test clock)
//! and the gates here decide whether a tick is due.

use std::cell::Cell;
use std::time::Instant;

/// A monotonically non-decreasing millisecond timestamp source
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by [`Instant`], measured from construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Manually advanced clock for tests and headless runs
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Move time forward; negative steps are ignored to stay monotonic
    pub fn advance(&self, ms: f64) {
        if ms > 0.0 {
            self.now.set(self.now.get() + ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Rate limiter for host-driven ticks
///
/// The first call after a reset only records a baseline. After that a call
/// passes once at least `min_interval_ms` has elapsed since the last pass;
/// anything sooner is a no-op, so tick rate is independent of how often the
/// host calls in.
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval_ms: f64,
    last_ms: Option<f64>,
}

impl Throttle {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms: min_interval_ms.max(0.0),
            last_ms: None,
        }
    }

    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            None => {
                self.last_ms = Some(now_ms);
                false
            }
            Some(last) if now_ms - last >= self.min_interval_ms => {
                self.last_ms = Some(now_ms);
                true
            }
            Some(_) => false,
        }
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Cancellable periodic timer
///
/// Armed timers take their baseline from the first poll, then fire once per
/// period. A late poll fires once and re-arms from `now` instead of replaying
/// every missed period. Cancelling is immediate: a cancelled timer never
/// fires again until [`Interval::arm`] is called.
#[derive(Debug, Clone, Default)]
pub struct Interval {
    armed: bool,
    next_due_ms: Option<f64>,
}

impl Interval {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) {
        self.armed = true;
        self.next_due_ms = None;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
        self.next_due_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns true if the timer fired. `period_ms` is read at re-arm time,
    /// so a changing period takes effect from the next cycle.
    pub fn poll(&mut self, now_ms: f64, period_ms: f64) -> bool {
        if !self.armed {
            return false;
        }
        let period = period_ms.max(0.0);
        match self.next_due_ms {
            None => {
                self.next_due_ms = Some(now_ms + period);
                false
            }
            Some(due) if now_ms >= due => {
                let next = due + period;
                self.next_due_ms = Some(if next > now_ms { next } else { now_ms + period });
                true
            }
            Some(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::new(100.0);
        clock.advance(16.0);
        clock.advance(-50.0);
        assert_eq!(clock.now_ms(), 116.0);
    }

    #[test]
    fn test_monotonic_clock_never_goes_back() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_throttle_first_call_sets_baseline() {
        let mut gate = Throttle::new(16.0);
        assert!(!gate.ready(1000.0));
        assert!(!gate.ready(1010.0));
        assert!(gate.ready(1016.0));
        assert!(!gate.ready(1020.0));
        assert!(gate.ready(1040.0));
    }

    #[test]
    fn test_throttle_ignores_high_frequency_calls() {
        // Host calling at 240 Hz still yields ~60 ticks per second
        let mut gate = Throttle::new(16.0);
        let mut ticks = 0;
        for i in 0..=240 {
            if gate.ready(i as f64 * (1000.0 / 240.0)) {
                ticks += 1;
            }
        }
        assert!((55..=62).contains(&ticks), "got {ticks} ticks");
    }

    #[test]
    fn test_throttle_reset() {
        let mut gate = Throttle::new(16.0);
        gate.ready(0.0);
        assert!(gate.ready(20.0));
        gate.reset();
        assert!(!gate.ready(100.0));
        assert!(gate.ready(116.0));
    }

    #[test]
    fn test_interval_fires_each_period() {
        let mut timer = Interval::new();
        timer.arm();
        assert!(!timer.poll(0.0, 100.0));
        assert!(!timer.poll(50.0, 100.0));
        assert!(timer.poll(100.0, 100.0));
        assert!(!timer.poll(150.0, 100.0));
        assert!(timer.poll(200.0, 100.0));
    }

    #[test]
    fn test_interval_late_poll_fires_once() {
        let mut timer = Interval::new();
        timer.arm();
        timer.poll(0.0, 100.0);
        assert!(timer.poll(1000.0, 100.0));
        assert!(!timer.poll(1000.0, 100.0));
        assert!(timer.poll(1100.0, 100.0));
    }

    #[test]
    fn test_interval_cancel_is_immediate() {
        let mut timer = Interval::new();
        timer.arm();
        timer.poll(0.0, 100.0);
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.poll(100.0, 100.0));
        assert!(!timer.poll(10_000.0, 100.0));
    }

    #[test]
    fn test_interval_unarmed_never_fires() {
        let mut timer = Interval::new();
        assert!(!timer.poll(0.0, 10.0));
        assert!(!timer.poll(1000.0, 10.0));
    }

    #[test]
    fn test_interval_period_change_applies_on_rearm() {
        let mut timer = Interval::new();
        timer.arm();
        timer.poll(0.0, 100.0);
        assert!(timer.poll(100.0, 50.0));
        // Next due at 150 with the shorter period
        assert!(timer.poll(150.0, 50.0));
    }
}
