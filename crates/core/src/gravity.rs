//! Gravity timer owned by a session
//!
//! The timer is driven by elapsed time handed in by the driver, so it has no
//! thread or clock of its own. Cancelling it drops any partial interval;
//! arming it starts a fresh interval, so the first tick after a resume comes
//! one full interval later.

use crate::types::DEFAULT_GRAVITY_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gravity {
    interval_ms: u32,
    elapsed_ms: u32,
    armed: bool,
}

impl Gravity {
    /// A disarmed timer with the given interval (clamped to at least 1ms).
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
            armed: false,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Time accumulated toward the next tick.
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Start a fresh interval.
    pub fn arm(&mut self) {
        self.armed = true;
        self.elapsed_ms = 0;
    }

    /// Stop the timer; pending time is discarded.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0;
    }

    /// Advance by `elapsed_ms` and take at most one due tick.
    ///
    /// Returns true when a tick is due. Any further whole intervals stay
    /// banked; callers loop on [`Gravity::poll`] so the timer can be cancelled
    /// between ticks (e.g. by a game over).
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.armed {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        self.poll()
    }

    /// Take one banked tick without advancing time.
    pub fn poll(&mut self) -> bool {
        if !self.armed || self.elapsed_ms < self.interval_ms {
            return false;
        }
        self.elapsed_ms -= self.interval_ms;
        true
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_fires() {
        let mut g = Gravity::new(100);
        assert!(!g.advance(10_000));
        assert_eq!(g.elapsed_ms(), 0);
    }

    #[test]
    fn test_fires_after_full_interval() {
        let mut g = Gravity::new(100);
        g.arm();
        assert!(!g.advance(99));
        assert!(g.advance(1));
        assert!(!g.poll());
    }

    #[test]
    fn test_banks_multiple_intervals() {
        let mut g = Gravity::new(100);
        g.arm();
        assert!(g.advance(350));
        assert!(g.poll());
        assert!(g.poll());
        assert!(!g.poll());
        assert_eq!(g.elapsed_ms(), 50);
    }

    #[test]
    fn test_cancel_discards_pending_time() {
        let mut g = Gravity::new(100);
        g.arm();
        g.advance(90);
        g.cancel();
        g.arm();
        assert!(!g.advance(90));
        assert!(g.advance(10));
    }

    #[test]
    fn test_zero_interval_clamped() {
        assert_eq!(Gravity::new(0).interval_ms(), 1);
    }
}
